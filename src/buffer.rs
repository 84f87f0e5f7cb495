//! In-memory text buffer with a selection set.
//!
//! Offsets are byte offsets into the UTF-8 text and must sit on character
//! boundaries. A [`Region`] keeps its anchor (`a`) and caret (`b`) in the order
//! the user made them; `begin`/`end` give the ordered view.

use std::fmt;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("offset {offset} is beyond the end of the buffer ({len} bytes)")]
    OutOfBounds { offset: usize, len: usize },
    #[error("offset {0} is not on a character boundary")]
    NotCharBoundary(usize),
    #[error("line {line} does not exist (buffer has {count} lines)")]
    NoSuchLine { line: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, BufferError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    pub a: usize,
    pub b: usize,
}

impl Region {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// An empty region, i.e. a plain cursor.
    pub fn cursor(at: usize) -> Self {
        Self { a: at, b: at }
    }

    pub fn begin(&self) -> usize {
        self.a.min(self.b)
    }

    pub fn end(&self) -> usize {
        self.a.max(self.b)
    }

    pub fn size(&self) -> usize {
        self.end() - self.begin()
    }

    pub fn is_empty(&self) -> bool {
        self.a == self.b
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.begin() <= offset && offset <= self.end()
    }

    /// True for equal regions, regions sharing at least one character, or a
    /// cursor strictly inside a region. Regions that only touch do not overlap.
    pub fn overlaps(&self, other: Region) -> bool {
        *self == other || (self.begin() < other.end() && other.begin() < self.end())
    }

    /// Smallest region covering both. Equal regions keep their direction.
    pub fn cover(&self, other: Region) -> Region {
        if *self == other {
            return *self;
        }
        Region::new(self.begin().min(other.begin()), self.end().max(other.end()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.a, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    selections: Vec<Region>,
}

impl TextBuffer {
    /// New buffer with a single cursor at the start.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), selections: vec![Region::cursor(0)] }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn size(&self) -> usize {
        self.text.len()
    }

    pub fn selections(&self) -> &[Region] {
        &self.selections
    }

    pub fn clear_selections(&mut self) {
        self.selections.clear();
    }

    /// Add a selection, merging it with every selection it overlaps.
    pub fn add_selection(&mut self, region: Region) -> Result<()> {
        self.check_offset(region.a)?;
        self.check_offset(region.b)?;

        let mut merged = region;
        loop {
            let before = self.selections.len();
            self.selections.retain(|existing| {
                if existing.overlaps(merged) {
                    merged = merged.cover(*existing);
                    false
                } else {
                    true
                }
            });
            if self.selections.len() == before {
                break;
            }
        }
        self.selections.push(merged);
        Ok(())
    }

    /// Replace the whole selection set.
    pub fn set_selections(&mut self, regions: impl IntoIterator<Item = Region>) -> Result<()> {
        self.clear_selections();
        for region in regions {
            self.add_selection(region)?;
        }
        Ok(())
    }

    pub fn substr(&self, region: Region) -> Result<&str> {
        self.check_offset(region.begin())?;
        self.check_offset(region.end())?;
        Ok(&self.text[region.begin()..region.end()])
    }

    /// Insert `text` at `offset`. Selection points after the offset move with
    /// the text; a cursor sitting exactly on it ends up after the insertion.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<()> {
        self.check_offset(offset)?;
        self.text.insert_str(offset, text);

        let shift = text.len();
        for region in &mut self.selections {
            let at_cursor = region.is_empty() && region.a == offset;
            for point in [&mut region.a, &mut region.b] {
                if *point > offset || at_cursor {
                    *point += shift;
                }
            }
        }
        Ok(())
    }

    /// Replace the text covered by `region`.
    pub fn replace(&mut self, region: Region, text: &str) -> Result<()> {
        let (begin, end) = (region.begin(), region.end());
        self.check_offset(begin)?;
        self.check_offset(end)?;
        self.text.replace_range(begin..end, text);

        let new_end = begin + text.len();
        for selection in &mut self.selections {
            for point in [&mut selection.a, &mut selection.b] {
                if *point >= end {
                    *point = *point - end + new_end;
                } else if *point > begin {
                    *point = new_end;
                }
            }
        }
        Ok(())
    }

    /// The full lines touched by `region`, without the trailing newline.
    pub fn line(&self, region: Region) -> Result<Region> {
        self.check_offset(region.begin())?;
        self.check_offset(region.end())?;
        let begin = self.text[..region.begin()].rfind('\n').map_or(0, |i| i + 1);
        let end = self.text[region.end()..]
            .find('\n')
            .map_or(self.text.len(), |i| region.end() + i);
        Ok(Region::new(begin, end))
    }

    /// Split `region` into one region per line. Empty lines give empty regions.
    pub fn split_by_newlines(&self, region: Region) -> Result<Vec<Region>> {
        let slice = self.substr(region)?;
        let mut lines = Vec::new();
        let mut start = region.begin();
        for (i, _) in slice.match_indices('\n') {
            let newline = region.begin() + i;
            lines.push(Region::new(start, newline));
            start = newline + 1;
        }
        lines.push(Region::new(start, region.end()));
        Ok(lines)
    }

    /// Region of the zero-based line `row`.
    pub fn line_region(&self, row: usize) -> Result<Region> {
        let lines = self.split_by_newlines(Region::new(0, self.size()))?;
        let count = lines.len();
        lines.get(row).copied().ok_or(BufferError::NoSuchLine { line: row, count })
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if offset > self.text.len() {
            return Err(BufferError::OutOfBounds { offset, len: self.text.len() });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(BufferError::NotCharBoundary(offset));
        }
        Ok(())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(String::new())
    }
}
