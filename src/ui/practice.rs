use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::layout::calculate_practice_chunks;
use super::{key_span, title_style};
use crate::practice::{PracticeSession, PracticeState};

pub fn draw_practice(f: &mut Frame, session: &PracticeSession) {
    let layout = calculate_practice_chunks(f.area());

    let mut header_spans = vec![Span::styled("vocab:practice", title_style())];
    if let Some((round, total)) = session.progress() {
        header_spans.push(Span::from(format!("   {} of {}", round, total)));
    }
    let header = Paragraph::new(Line::from(header_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let mut term_text = Text::default();
    if let Some(item) = session.current() {
        term_text.push_line(Line::from(Span::styled(
            item.term.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        term_text.push_line(Line::from(""));
        term_text.push_line(Line::from(Span::styled(
            format!("knowledge: {}", item.knowledge_level),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let mut answer_text = Text::default();
    let mut answer_title = "";
    let mut help_spans = Vec::new();
    match session.state() {
        PracticeState::Init | PracticeState::Loading | PracticeState::Empty => {
            answer_text.push_line(Line::from("loading..."));
        }
        PracticeState::Input { guess } => {
            answer_title = "Translation";
            answer_text.push_line(Line::from(guess.text()));
            f.set_cursor_position((
                layout.answer_area.x + 1 + guess.cursor_column() as u16,
                layout.answer_area.y + 1,
            ));
            let guess_style = if session.can_guess() {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            help_spans.extend([Span::styled("Enter", guess_style), Span::from(" Guess  ")]);
        }
        PracticeState::Result { guess, passed } => {
            answer_title = "Result";
            let (verdict, color) = if *passed {
                ("great!", Color::Green)
            } else {
                ("oops...", Color::Red)
            };
            answer_text.push_line(Line::from(Span::styled(
                verdict,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            if let Some(item) = session.current() {
                answer_text.push_line(Line::from(format!("translation: {}", item.translation)));
            }
            answer_text.push_line(Line::from(format!("your guess: {}", guess)));
            help_spans.extend([key_span("Enter"), Span::from(" Next  ")]);
        }
        PracticeState::Submitting { failure } => {
            answer_text.push_line(Line::from("saving results..."));
            if let Some(failure) = failure {
                answer_text.push_line(Line::from(Span::styled(
                    format!("saving failed: {}", failure),
                    Style::default().fg(Color::Red),
                )));
                help_spans.extend([key_span("Ctrl+R"), Span::from(" Retry  ")]);
            }
        }
        PracticeState::Done { passed, total } => {
            answer_text.push_line(Line::from(Span::styled(
                format!("you got {} out of {} correct!", passed, total),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            help_spans.extend([key_span("Enter"), Span::from(" Home  ")]);
        }
    }

    let term = Paragraph::new(term_text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Term"));
    f.render_widget(term, layout.term_area);

    let answer = Paragraph::new(answer_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(answer_title));
    f.render_widget(answer, layout.answer_area);

    help_spans.extend([
        key_span("Esc"),
        Span::from(" Home  "),
        key_span("Ctrl+C"),
        Span::from(" Exit App"),
    ]);
    let help = Paragraph::new(Line::from(help_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
