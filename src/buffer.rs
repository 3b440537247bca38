/// In-memory line view of one file's text
///
/// Lines are addressed 1-indexed, matching lint reporter positions. Slots
/// are never spliced while a file is being processed: deleting a line only
/// marks its slot, so line numbers of pending findings stay valid. Removed
/// slots are dropped when the buffer is serialized back to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    /// Line slots in file order (None = line deleted)
    slots: Vec<Option<String>>,
    /// Whether the source text ended with a newline
    trailing_newline: bool,
}

impl LineBuffer {
    /// Split text into a line buffer
    ///
    /// Lines are split on `'\n'` only; carriage returns stay attached to
    /// their line, so CRLF content round-trips byte-for-byte through
    /// `to_text`.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self {
                slots: Vec::new(),
                trailing_newline: false,
            };
        }

        let trailing_newline = text.ends_with('\n');
        let body = if trailing_newline {
            &text[..text.len() - 1]
        } else {
            text
        };

        Self {
            slots: body.split('\n').map(|l| Some(l.to_string())).collect(),
            trailing_newline,
        }
    }

    /// Number of line slots, including deleted ones
    pub fn line_count(&self) -> usize {
        self.slots.len()
    }

    /// Get the text of a line (1-indexed)
    ///
    /// Returns None for out-of-range line numbers and for deleted lines.
    pub fn line(&self, line_number: usize) -> Option<&str> {
        if line_number == 0 {
            return None;
        }
        self.slots
            .get(line_number - 1)
            .and_then(|slot| slot.as_deref())
    }

    /// Replace the text of a line (1-indexed)
    ///
    /// Out-of-range line numbers and deleted lines are left untouched.
    pub fn set_line(&mut self, line_number: usize, text: String) {
        if line_number == 0 {
            return;
        }
        if let Some(slot) = self.slots.get_mut(line_number - 1) {
            if slot.is_some() {
                *slot = Some(text);
            }
        }
    }

    /// Mark a line as deleted (1-indexed)
    ///
    /// The slot stays in place so later line numbers keep their meaning;
    /// the line is dropped when the buffer is serialized.
    pub fn delete_line(&mut self, line_number: usize) {
        if line_number == 0 {
            return;
        }
        if let Some(slot) = self.slots.get_mut(line_number - 1) {
            *slot = None;
        }
    }

    /// Serialize the buffer back to text, dropping deleted lines
    pub fn to_text(&self) -> String {
        let kept: Vec<&str> = self
            .slots
            .iter()
            .filter_map(|slot| slot.as_deref())
            .collect();

        if kept.is_empty() {
            return String::new();
        }

        let mut text = kept.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_with_trailing_newline() {
        let text = "line one\nline two\nline three\n";
        let buffer = LineBuffer::from_text(text);

        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.to_text(), text);
    }

    #[test]
    fn test_round_trip_without_trailing_newline() {
        let text = "line one\nline two";
        let buffer = LineBuffer::from_text(text);

        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.to_text(), text);
    }

    #[test]
    fn test_round_trip_crlf() {
        let text = "line one\r\nline two\r\n";
        let buffer = LineBuffer::from_text(text);

        // CR stays attached to its line
        assert_eq!(buffer.line(1), Some("line one\r"));
        assert_eq!(buffer.to_text(), text);
    }

    #[test]
    fn test_empty_text() {
        let buffer = LineBuffer::from_text("");

        assert_eq!(buffer.line_count(), 0);
        assert_eq!(buffer.line(1), None);
        assert_eq!(buffer.to_text(), "");
    }

    #[test]
    fn test_line_is_one_indexed() {
        let buffer = LineBuffer::from_text("first\nsecond\n");

        assert_eq!(buffer.line(0), None);
        assert_eq!(buffer.line(1), Some("first"));
        assert_eq!(buffer.line(2), Some("second"));
        assert_eq!(buffer.line(3), None);
    }

    #[test]
    fn test_set_line() {
        let mut buffer = LineBuffer::from_text("first\nsecond\n");
        buffer.set_line(2, "changed".to_string());

        assert_eq!(buffer.to_text(), "first\nchanged\n");
    }

    #[test]
    fn test_set_line_out_of_range_is_noop() {
        let mut buffer = LineBuffer::from_text("first\n");
        buffer.set_line(5, "changed".to_string());

        assert_eq!(buffer.to_text(), "first\n");
    }

    #[test]
    fn test_delete_line_keeps_slot_positions() {
        let mut buffer = LineBuffer::from_text("first\nsecond\nthird\n");
        buffer.delete_line(2);

        // Line 3 still addresses "third" after the deletion
        assert_eq!(buffer.line(2), None);
        assert_eq!(buffer.line(3), Some("third"));
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.to_text(), "first\nthird\n");
    }

    #[test]
    fn test_delete_all_lines_yields_empty_text() {
        let mut buffer = LineBuffer::from_text("only\n");
        buffer.delete_line(1);

        assert_eq!(buffer.to_text(), "");
    }

    #[test]
    fn test_set_after_delete_is_noop() {
        let mut buffer = LineBuffer::from_text("first\nsecond\n");
        buffer.delete_line(1);
        buffer.set_line(1, "revived".to_string());

        assert_eq!(buffer.line(1), None);
        assert_eq!(buffer.to_text(), "second\n");
    }
}
