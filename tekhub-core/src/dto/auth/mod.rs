//! Authentication DTOs for the Hub catalog API

use serde::{Deserialize, Serialize};

/// Token issued by `POST /auth/login?code=...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub id: Option<u64>,
}
