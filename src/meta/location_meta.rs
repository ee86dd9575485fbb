use std::fmt;

use crate::meta::Meta;

/// metadata type for location data (used by generated parser)
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct LocationMeta {
    /// byte offset from the beginning of source code
    pub offset: usize,
}

impl From<usize> for LocationMeta {
    fn from(offset: usize) -> Self {
        Self { offset }
    }
}

/// human-readable location in the source file, lines and columns start at 1
#[derive(Debug, Default, PartialEq, Clone)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

pub trait GetLocation {
    fn get_location(&self) -> LocationMeta;
}

impl<ItemT> GetLocation for Meta<ItemT, LocationMeta> {
    fn get_location(&self) -> LocationMeta {
        *self.get_meta()
    }
}
