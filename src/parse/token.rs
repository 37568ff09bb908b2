/// Starts a comment that runs to the end of the line.
pub const COMMENT: u8 = b'#';

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Cursor over a single line that yields whitespace-delimited tokens.
///
/// Tokens end at a space, a tab, the comment marker or the end of the line.
/// Nothing is unescaped.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Advances past spaces and tabs.
    ///
    /// Returns `false` when the line has no more content, i.e. the cursor
    /// stopped at the end of the line or at a comment marker.
    pub fn skip_blank(&mut self) -> bool {
        let bytes = self.line.as_bytes();
        while self.pos < bytes.len() && is_blank(bytes[self.pos]) {
            self.pos += 1;
        }
        self.pos < bytes.len() && bytes[self.pos] != COMMENT
    }

    /// Reads the longest run of token characters and leaves the cursor on
    /// its terminator. Returns an empty token if the cursor is already on one.
    pub fn next_token(&mut self) -> &'a str {
        let bytes = self.line.as_bytes();
        let start = self.pos;
        while self.pos < bytes.len() && !is_blank(bytes[self.pos]) && bytes[self.pos] != COMMENT {
            self.pos += 1;
        }
        &self.line[start..self.pos]
    }

    /// The rest of the line from the cursor up to any comment marker, trimmed.
    pub fn remainder(&self) -> &'a str {
        let rest = &self.line[self.pos..];
        let end = rest
            .bytes()
            .position(|b| b == COMMENT)
            .unwrap_or(rest.len());
        rest[..end].trim_matches(|c| c == ' ' || c == '\t')
    }
}
