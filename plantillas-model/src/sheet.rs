#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Body of a sheet (PDF) composition request.
///
/// Identifiers are kept in the order the client sent them; duplicates and
/// unknown ids are allowed and handled during composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SheetRequest {
    #[cfg_attr(feature = "serde", serde(default))]
    pub uuids: Vec<String>,
}

impl SheetRequest {
    pub fn is_empty(&self) -> bool {
        self.uuids.is_empty()
    }
}
