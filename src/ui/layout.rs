use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct ListLayout {
    pub header_area: Rect,
    pub search_area: Rect,
    pub table_area: Rect,
    pub help_area: Rect,
}

pub struct AddLayout {
    pub header_area: Rect,
    pub term_area: Rect,
    pub translation_area: Rect,
    pub similar_area: Rect,
    pub help_area: Rect,
}

pub struct PracticeLayout {
    pub header_area: Rect,
    pub term_area: Rect,
    pub answer_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_list_chunks(area: Rect) -> ListLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .split(area);

    ListLayout {
        header_area: chunks[0],
        search_area: chunks[1],
        table_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_add_chunks(area: Rect) -> AddLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    AddLayout {
        header_area: chunks[0],
        term_area: chunks[1],
        translation_area: chunks[2],
        similar_area: chunks[3],
        help_area: chunks[4],
    }
}

pub fn calculate_practice_chunks(area: Rect) -> PracticeLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .split(area);

    PracticeLayout {
        header_area: chunks[0],
        term_area: chunks[1],
        answer_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
