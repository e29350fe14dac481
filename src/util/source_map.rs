use std::fmt;

/// A 1-based line and column inside a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line number, starting at 1.
    pub line:   usize,
    /// Column number in characters, starting at 1.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Resolves byte offsets into [`Position`]s.
///
/// Line starts are computed once up front so that every lookup is a binary
/// search instead of a rescan of the source prefix.
///
/// # Example
/// ```
/// use pencil::util::source_map::{Position, SourceMap};
///
/// let map = SourceMap::new("let @a = 1;\nconsole @a;");
///
/// assert_eq!(map.locate(0), Position { line: 1, column: 1 });
/// assert_eq!(map.locate(12), Position { line: 2, column: 1 });
/// assert_eq!(map.locate(20), Position { line: 2, column: 9 });
/// ```
#[derive(Debug, Clone)]
pub struct SourceMap<'s> {
    source:      &'s str,
    line_starts: Vec<usize>,
}

impl<'s> SourceMap<'s> {
    /// Builds the line table for `source`.
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        let line_starts = std::iter::once(0).chain(source.match_indices('\n')
                                                         .map(|(index, _)| index + 1))
                                            .collect();
        Self { source,
               line_starts }
    }

    /// Returns the position of the byte `offset`.
    ///
    /// Offsets past the end of the source clamp to the end. Lexer offsets
    /// always sit on character boundaries; anything else falls back to a byte
    /// count for the column.
    #[must_use]
    pub fn locate(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index - 1,
        };
        let line_start = self.line_starts[line_index];
        let column = self.source
                         .get(line_start..offset)
                         .map_or(offset - line_start, |prefix| prefix.chars().count());

        Position { line:   line_index + 1,
                   column: column + 1, }
    }

    /// The text this map was built from.
    #[must_use]
    pub const fn source(&self) -> &'s str {
        self.source
    }
}
