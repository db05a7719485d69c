//! Conversion errors with stable numeric codes.

use textml_lists::ListError;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Everything that can go wrong during a conversion.
///
/// Each kind carries a stable numeric [`code`](ErrorKind::code) which the
/// CLI uses as its process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("unsupported type of generator")]
    UnsupportedGeneratorType,
    #[error("conversion to the output encoding is not supported")]
    OutputConversionNotSupported,
    #[error("conversion from the input encoding is not supported")]
    InputConversionNotSupported,
    #[error("character cannot be decoded from the input")]
    CharacterNotDecodable,
    #[error("character cannot be encoded for the output")]
    CharacterNotEncodable,
    #[error("unknown tag")]
    UnknownTag,
    #[error("inline tag has no name")]
    NamelessInlineTag,
    #[error("unknown alignment")]
    UnknownAlignment,
    #[error("unexpected close tag")]
    UnexpectedCloseTag,
    #[error("inline tag is already declared")]
    InlineTagAlreadyExists,
    #[error("unsupported header level")]
    UnsupportedHeaderLevel,
    #[error("variable is not declared")]
    VariableNotDeclared,
    #[error("list index is too large")]
    ListIndexOverflow,
    #[error("maximum header depth exceeded")]
    MaxHeaderDepthExceeded,
    #[error("maximum list depth exceeded")]
    MaxListDepthExceeded,
    #[error("list item level skips a level")]
    ListLevelHop,
    #[error("invalid list format")]
    InvalidListFormat,
    #[error("list format is not set for the item's level")]
    ListFormatNotSet,
}

impl ErrorKind {
    /// Stable numeric code of this error kind.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::UnsupportedGeneratorType => 1,
            Self::OutputConversionNotSupported => 2,
            Self::InputConversionNotSupported => 3,
            Self::CharacterNotDecodable => 4,
            Self::CharacterNotEncodable => 5,
            Self::UnknownTag => 6,
            Self::NamelessInlineTag => 7,
            Self::UnknownAlignment => 8,
            Self::UnexpectedCloseTag => 9,
            Self::InlineTagAlreadyExists => 10,
            Self::UnsupportedHeaderLevel => 11,
            Self::VariableNotDeclared => 12,
            Self::ListIndexOverflow => 13,
            Self::MaxHeaderDepthExceeded => 14,
            Self::MaxListDepthExceeded => 15,
            Self::ListLevelHop => 16,
            Self::InvalidListFormat => 17,
            Self::ListFormatNotSet => 18,
        }
    }
}

/// A conversion failure, optionally located at a 1-based input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct ConvertError {
    kind: ErrorKind,
    line: Option<u32>,
}

impl ConvertError {
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, line: None }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 1-based input line the error was detected on, when known.
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// Numeric code of the underlying kind.
    #[must_use]
    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    /// Attaches a line number unless one is already recorded.
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        if self.line.is_none() {
            self.line = Some(line);
        }
        self
    }
}

impl From<ErrorKind> for ConvertError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<ListError> for ConvertError {
    fn from(err: ListError) -> Self {
        let kind = match err {
            ListError::IndexOverflow => ErrorKind::ListIndexOverflow,
            ListError::InvalidFormat => ErrorKind::InvalidListFormat,
            ListError::FormatNotSet(_) => ErrorKind::ListFormatNotSet,
        };
        Self::new(kind)
    }
}
