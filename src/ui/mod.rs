pub mod layout;
mod add_vocab;
mod confirm;
mod notifications;
mod practice;
mod vocab_list;

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

use crate::app::{App, View};

pub use add_vocab::draw_add_vocab;
pub use confirm::draw_delete_confirmation;
pub use layout::{calculate_add_chunks, calculate_list_chunks, calculate_practice_chunks};
pub use notifications::draw_notifications;
pub use practice::draw_practice;
pub use vocab_list::draw_vocab_list;

/// Renders the active view, then any open dialog, then notifications on top.
pub fn draw(f: &mut Frame, app: &App) {
    match app.view() {
        View::VocabList(list) => {
            draw_vocab_list(f, list);
            if let Some(prompt) = list.pending_delete().prompt() {
                draw_delete_confirmation(f, &prompt);
            }
        }
        View::AddVocab(add) => {
            draw_add_vocab(f, add);
            if let Some(prompt) = add.pending_delete().prompt() {
                draw_delete_confirmation(f, &prompt);
            }
        }
        View::Practice(session) => draw_practice(f, session),
    }
    draw_notifications(f, app.notifications());
}

fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}
