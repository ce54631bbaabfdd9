//! Line/column mapping for byte offsets.

use memchr::memchr_iter;

/// Zero-based line and column (column counted in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// Starting offset of every line in a source text.
#[derive(Debug, Clone, Default)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text. `\r\n` counts as one line break.
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0u32];
        for i in memchr_iter(b'\n', bytes) {
            line_starts.push((i + 1) as u32);
        }
        // Lone `\r` line endings are rare enough to scan for separately.
        if memchr::memchr(b'\r', bytes).is_some() {
            for i in memchr_iter(b'\r', bytes) {
                if bytes.get(i + 1) != Some(&b'\n') {
                    line_starts.push((i + 1) as u32);
                }
            }
            line_starts.sort_unstable();
        }
        LineMap { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Zero-based line containing `offset`.
    pub fn line_of(&self, offset: u32) -> u32 {
        match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact as u32,
            Err(insert_point) => insert_point.saturating_sub(1) as u32,
        }
    }

    /// Convert a byte offset to a line/column position.
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = self.line_of(offset);
        let line_start = self.line_starts.get(line as usize).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let slice = source.get(start..clamped_end).unwrap_or("");
        Position::new(line, slice.chars().count() as u32)
    }

    /// Text of a zero-based line without its line terminator.
    pub fn line_text<'a>(&self, line: u32, source: &'a str) -> &'a str {
        let Some(&start) = self.line_starts.get(line as usize) else {
            return "";
        };
        let end = self
            .line_starts
            .get(line as usize + 1)
            .map_or(source.len(), |&next| next as usize);
        source
            .get(start as usize..end)
            .unwrap_or("")
            .trim_end_matches(['\n', '\r'])
    }
}
