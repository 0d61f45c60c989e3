use chrono::{DateTime, Utc};

use crate::id::DbId;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationOutcome {
    Success,
    Failure,
}

/// An audit entry recorded by the backend for each mutating request
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OperationLog {
    pub id: DbId,
    pub username: String,
    pub method: String,
    pub path: String,
    pub outcome: OperationOutcome,
    pub created_at: DateTime<Utc>,
}
