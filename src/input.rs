use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::utils::display_width;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Changed,
    Moved,
    Ignored,
}

/// Single-line text field. The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    buffer: String,
    cursor: usize,
}

impl LineInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Terminal columns between the start of the field and the cursor.
    pub fn cursor_column(&self) -> usize {
        let prefix: String = self.buffer.chars().take(self.cursor).collect();
        display_width(&prefix)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = text.chars().count();
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.buffer.len())
    }

    pub fn insert(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.buffer.insert(offset, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let offset = self.byte_offset(self.cursor - 1);
        self.buffer.remove(offset);
        self.cursor -= 1;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.buffer.chars().count() {
            return false;
        }
        let offset = self.byte_offset(self.cursor);
        self.buffer.remove(offset);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
    }

    /// Applies an editing key. Keys with Ctrl/Alt held are left to the caller.
    pub fn handle_key(&mut self, key: KeyEvent) -> EditOutcome {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return EditOutcome::Ignored;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.insert(c);
                EditOutcome::Changed
            }
            KeyCode::Backspace => {
                if self.backspace() {
                    EditOutcome::Changed
                } else {
                    EditOutcome::Ignored
                }
            }
            KeyCode::Delete => {
                if self.delete() {
                    EditOutcome::Changed
                } else {
                    EditOutcome::Ignored
                }
            }
            KeyCode::Left => {
                self.move_left();
                EditOutcome::Moved
            }
            KeyCode::Right => {
                self.move_right();
                EditOutcome::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                EditOutcome::Moved
            }
            KeyCode::End => {
                self.cursor = self.buffer.chars().count();
                EditOutcome::Moved
            }
            _ => EditOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_can_type_r_and_c() {
        let mut input = LineInput::new();
        for c in ['r', 'c', 'R', 'C'] {
            assert_eq!(input.handle_key(key(KeyCode::Char(c))), EditOutcome::Changed);
        }
        assert_eq!(input.text(), "rcRC");
    }

    #[test]
    fn test_ctrl_keys_are_not_typed() {
        let mut input = LineInput::new();
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(input.handle_key(ctrl_r), EditOutcome::Ignored);
        assert!(input.is_empty());
    }

    #[test]
    fn test_cursor_left_right_movement() {
        let mut input = LineInput::with_text("Hello");
        assert_eq!(input.cursor(), 5);

        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        assert_eq!(input.cursor(), 3);

        input.handle_key(key(KeyCode::Right));
        assert_eq!(input.cursor(), 4);

        for _ in 0..10 {
            input.handle_key(key(KeyCode::Left));
        }
        assert_eq!(input.cursor(), 0);

        for _ in 0..10 {
            input.handle_key(key(KeyCode::Right));
        }
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_insert_character_at_cursor_position() {
        let mut input = LineInput::with_text("Helo");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Char('l')));
        assert_eq!(input.text(), "Hello");
        assert_eq!(input.cursor(), 4);

        input.handle_key(key(KeyCode::Home));
        input.handle_key(key(KeyCode::Char('W')));
        assert_eq!(input.text(), "WHello");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_backspace_deletes_before_cursor() {
        let mut input = LineInput::with_text("Hello World");
        for _ in 0..6 {
            input.move_left();
        }
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), EditOutcome::Changed);
        assert_eq!(input.text(), "Hell World");
        assert_eq!(input.cursor(), 4);

        input.handle_key(key(KeyCode::Home));
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), EditOutcome::Ignored);
        assert_eq!(input.text(), "Hell World");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = LineInput::with_text("niño");
        input.move_left();
        assert!(input.backspace());
        assert_eq!(input.text(), "nio");
        input.insert('ñ');
        assert_eq!(input.text(), "niño");
        assert_eq!(input.cursor_column(), 3);
    }

    #[test]
    fn test_delete_at_end_is_ignored() {
        let mut input = LineInput::with_text("ab");
        assert_eq!(input.handle_key(key(KeyCode::Delete)), EditOutcome::Ignored);
        input.move_left();
        assert_eq!(input.handle_key(key(KeyCode::Delete)), EditOutcome::Changed);
        assert_eq!(input.text(), "a");
    }
}
