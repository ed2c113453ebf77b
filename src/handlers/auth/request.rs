//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email
    #[validate(length(min = 1, max = 255))]
    pub identifier: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}
