use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::notifications::Notifications;
use crate::utils::truncate_string;

const NOTIFICATION_WIDTH: u16 = 40;
const NOTIFICATION_HEIGHT: u16 = 3;

/// Stacks notifications in the top-right corner, newest at the top.
pub fn draw_notifications(f: &mut Frame, notifications: &Notifications) {
    let screen = f.area();
    let width = NOTIFICATION_WIDTH.min(screen.width);
    let x = screen.x + screen.width - width;

    for (i, notification) in notifications.visible().into_iter().enumerate() {
        let y = screen.y + 1 + i as u16 * NOTIFICATION_HEIGHT;
        if y + NOTIFICATION_HEIGHT > screen.y + screen.height {
            break;
        }
        let area = Rect::new(x, y, width, NOTIFICATION_HEIGHT);
        f.render_widget(Clear, area);
        let text = truncate_string(&notification.text, width.saturating_sub(2) as usize);
        let popup = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
        f.render_widget(popup, area);
    }
}
