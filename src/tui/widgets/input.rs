/// Editable text buffer for form fields. The cursor is a char index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    text: String,
    cursor: usize,
}

impl LineInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-filled with `text`, cursor at the end
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Text with a bar drawn at the cursor, for the focused field
    pub fn display_with_cursor(&self) -> String {
        let at = self.byte_index(self.cursor);
        format!("{}▏{}", &self.text[..at], &self.text[at..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_at_cursor_with_multibyte_chars() {
        let mut input = LineInput::with_text("héllo");
        input.move_left();
        input.move_left();
        input.insert_char('X');
        assert_eq!(input.text(), "hélXlo");
        input.backspace();
        input.move_home();
        input.delete();
        assert_eq!(input.text(), "éllo");
        input.move_end();
        input.backspace();
        assert_eq!(input.text(), "éll");
        assert_eq!(input.display_with_cursor(), "éll▏");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = LineInput::new();
        input.backspace();
        input.delete();
        input.move_left();
        input.move_right();
        assert_eq!(input.display_with_cursor(), "▏");

        let mut input = LineInput::with_text("ab");
        input.move_left();
        assert_eq!(input.display_with_cursor(), "a▏b");
        input.move_home();
        input.backspace();
        assert_eq!(input.text(), "ab");
    }
}
