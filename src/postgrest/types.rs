//! Types for the PostgrestClient

/// Options for returning data from writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOption {
    /// Return the written rows
    Representation,

    /// Return nothing
    Minimal,
}

impl ReturnOption {
    /// The `Prefer` header value for this option
    pub fn prefer_header(&self) -> &'static str {
        match self {
            ReturnOption::Representation => "return=representation",
            ReturnOption::Minimal => "return=minimal",
        }
    }
}
