use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use super::layout::calculate_list_chunks;
use super::{key_span, title_style};
use crate::utils::{days_until, truncate_string};
use crate::vocab_list::VocabList;

pub fn draw_vocab_list(f: &mut Frame, list: &VocabList) {
    let layout = calculate_list_chunks(f.area());
    let query = list.query();

    let mut header_spans = vec![Span::styled("vocab", title_style())];
    if query.total_pages > 1 {
        header_spans.push(Span::from(format!(
            "   {} of {}",
            query.page, query.total_pages
        )));
    }
    if list.practice_count() > 0 {
        header_spans.push(Span::styled(
            format!("   practice ({})", list.practice_count()),
            Style::default().fg(Color::Green),
        ));
    }
    let header = Paragraph::new(Line::from(header_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let search_title = format!("Search (sort: {})", query.order.label());
    let search = Paragraph::new(if list.search().is_empty() {
        Line::from(Span::styled(
            "[type to search...]",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(list.search().text())
    })
    .block(Block::default().borders(Borders::ALL).title(search_title));
    f.render_widget(search, layout.search_area);

    if !list.pending_delete().is_open() {
        let cursor_x = layout.search_area.x + 1 + list.search().cursor_column() as u16;
        f.set_cursor_position((cursor_x, layout.search_area.y + 1));
    }

    let now = Utc::now();
    let rows: Vec<Row> = if list.items().is_empty() {
        vec![Row::new(vec!["No vocab found"]).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        list.items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == list.selected() {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    truncate_string(&item.term, 30),
                    truncate_string(&item.translation, 30),
                    item.knowledge_level.to_string(),
                    format!("{} days", days_until(item.practice_at, now)),
                ])
                .style(style)
            })
            .collect()
    };

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Length(9),
            Constraint::Min(8),
        ],
    )
    .header(
        Row::new(vec!["term", "translation", "knowledge", "practice next"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(table, layout.table_area);

    let help_text = vec![
        Line::from(vec![
            key_span("↑/↓"),
            Span::from(" Select  "),
            key_span("PgUp/PgDn"),
            Span::from(" Page  "),
            key_span("Tab"),
            Span::from(" Sort  "),
            key_span("Ctrl+D"),
            Span::from(" Delete"),
        ]),
        Line::from(vec![
            key_span("Ctrl+A"),
            Span::from(" Add  "),
            key_span("Ctrl+P"),
            Span::from(" Practice  "),
            key_span("Esc/Ctrl+C"),
            Span::from(" Quit"),
        ]),
    ];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
