/// Position of a lexeme in the source.
///
/// `line` and `column` are 1-based, `column` counts characters from the start
/// of the line. `end_line`/`end_column` point just past the last character.
/// `start`/`end` are byte offsets into the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub start: usize,
    pub end: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Span {
    /// Span whose end position is its start; see `ends_at`.
    pub fn new(line: usize, column: usize, start: usize, end: usize) -> Self {
        Self {
            line,
            column,
            start,
            end,
            end_line: line,
            end_column: column,
        }
    }

    pub fn ends_at(self, end_line: usize, end_column: usize) -> Self {
        Self { end_line, end_column, ..self }
    }

    /// Zero-width span right after this one.
    pub fn after(&self) -> Self {
        Self::new(self.end_line, self.end_column, self.end, self.end)
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::new(1, 1, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn after_starts_where_the_span_ends() {
        let span = Span::new(2, 4, 10, 16).ends_at(3, 2);
        assert_eq!(span.after(), Span::new(3, 2, 16, 16));
    }
}
