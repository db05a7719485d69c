//! List numbering support: per-level item counters, index generators and
//! the per-level format string parser.
//!
//! A list index is rendered from an *item path*: the 1-based indexes of the
//! item's ancestors, one per nesting level. `ListItemsCounter` maintains the
//! path while a document is generated; `ListFormat` maps each nesting level
//! to an index generator parsed from a format string such as
//! `#./.#./#)/(I)/i./(a-z)`.

mod counter;
mod format;
mod index;

pub use counter::ListItemsCounter;
pub use format::{ListFormat, MAX_LEVELS};
pub use index::{
    CharRangeIndex, IndexGenerator, MultiLevelNumericIndex, RomanIndex, SingleLevelNumericIndex,
};

/// Errors produced while parsing list formats or rendering indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// The rendered index would not fit the index buffer, or the item path
    /// holds a value the generator cannot represent.
    #[error("list index overflow")]
    IndexOverflow,
    /// The format string does not follow the `a/b/c` per-level grammar.
    #[error("invalid list format")]
    InvalidFormat,
    /// The format string defines no generator for the requested level.
    #[error("list format is not set for level {0}")]
    FormatNotSet(usize),
}
