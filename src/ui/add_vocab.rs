use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::layout::calculate_add_chunks;
use super::{key_span, title_style};
use crate::add_vocab::{AddField, AddVocab};
use crate::utils::truncate_string;

fn field_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        })
}

pub fn draw_add_vocab(f: &mut Frame, add: &AddVocab) {
    let layout = calculate_add_chunks(f.area());

    let header = Paragraph::new("vocab:add")
        .style(title_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let term = Paragraph::new(Line::from(add.term().text()))
        .block(field_block("Term", add.focus() == AddField::Term));
    f.render_widget(term, layout.term_area);

    let translation = Paragraph::new(Line::from(add.translation().text()))
        .block(field_block("Translation", add.focus() == AddField::Translation));
    f.render_widget(translation, layout.translation_area);

    if !add.pending_delete().is_open() {
        let (area, input) = match add.focus() {
            AddField::Term => (layout.term_area, add.term()),
            AddField::Translation => (layout.translation_area, add.translation()),
        };
        f.set_cursor_position((area.x + 1 + input.cursor_column() as u16, area.y + 1));
    }

    let items: Vec<ListItem> = if add.similar().is_empty() {
        vec![ListItem::new("No similar vocab").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        add.similar()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == add.selected() {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(format!(
                    "{} - {}",
                    truncate_string(&item.term, 30),
                    truncate_string(&item.translation, 30)
                ))
                .style(style)
            })
            .collect()
    };
    let similar = List::new(items).block(Block::default().borders(Borders::ALL).title("Similar"));
    f.render_widget(similar, layout.similar_area);

    let submit_style = if add.can_submit() {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let help_text = vec![Line::from(vec![
        Span::styled("Enter", submit_style),
        Span::from(" Add  "),
        key_span("Tab"),
        Span::from(" Switch Field  "),
        key_span("↑/↓"),
        Span::from(" Select  "),
        key_span("Ctrl+D"),
        Span::from(" Delete  "),
        key_span("Esc"),
        Span::from(" Back"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
