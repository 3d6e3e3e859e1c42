use serde::{Deserialize, Serialize};

use super::amount_serde;
use super::record_id::RecordId;

/// A monthly spending limit for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: RecordId,
    pub category: String,
    #[serde(deserialize_with = "amount_serde::deserialize")]
    pub limit: f64,
}
