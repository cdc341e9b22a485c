use serde::{Deserialize, Serialize};

// Absent fields deserialize to empty strings and are rejected by the
// service-level validation, rather than failing JSON extraction.

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for code issuance.
#[derive(Debug, Deserialize)]
pub struct SendCodeRequest {
    #[serde(default)]
    pub email: String,
}

/// Request body for code verification.
#[derive(Debug, Deserialize)]
pub struct VerifyCodeRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub code: String,
}

/// Request body for password login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Success body returned by every auth route.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
