use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Smallest value the server generates.
pub const MIN_VALUE: i64 = 0;
/// Largest value the server generates.
pub const MAX_VALUE: i64 = 99;

/// A number generated and stored by the server. Never mutated by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedNumber {
    pub id: u64,
    pub value: i64,
    pub created_at: DateTime<Utc>,
}

impl GeneratedNumber {
    pub fn new(id: u64, value: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            value,
            created_at,
        }
    }
}

/// Envelope returned by the paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub results: Vec<GeneratedNumber>,
    pub count: u64,
}

/// Body returned by the generate endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub value: i64,
}
