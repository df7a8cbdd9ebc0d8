pub mod output;

use crate::document::{Document, TextRange};
use std::fmt;
use std::str::FromStr;

/// 1-based `LINE:COLUMN` as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn resolve(&self, document: &Document) -> Option<usize> {
        document.offset_at(self.line, self.column)
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (line, column) = s
            .split_once(':')
            .ok_or_else(|| format!("expected LINE:COLUMN, got '{}'", s))?;
        let line: usize = line
            .trim()
            .parse()
            .map_err(|_| format!("invalid line in '{}'", s))?;
        let column: usize = column
            .trim()
            .parse()
            .map_err(|_| format!("invalid column in '{}'", s))?;

        if line == 0 || column == 0 {
            return Err(format!("lines and columns start at 1, got '{}'", s));
        }

        Ok(Position { line, column })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// `LINE:COLUMN-LINE:COLUMN`, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    pub fn resolve(&self, document: &Document) -> Option<TextRange> {
        let start = self.start.resolve(document)?;
        let end = self.end.resolve(document)?;
        (start <= end).then(|| TextRange::new(start, end))
    }
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| format!("expected LINE:COLUMN-LINE:COLUMN, got '{}'", s))?;
        Ok(Selection {
            start: start.parse()?,
            end: end.parse()?,
        })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
