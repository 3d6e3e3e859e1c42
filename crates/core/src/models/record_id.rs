use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a transaction, obligation or budget.
///
/// New records get a random UUID. Documents written by earlier versions of
/// the app carry millisecond timestamps as numeric ids; those are kept as-is
/// so that lookups, edits and re-exports still address the same record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Uuid(Uuid),
    Legacy(i64),
}

impl RecordId {
    /// Fresh random id for a new record.
    pub fn new() -> Self {
        RecordId::Uuid(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        RecordId::Uuid(id)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Legacy(id)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Uuid(id) => write!(f, "{id}"),
            RecordId::Legacy(id) => write!(f, "{id}"),
        }
    }
}
