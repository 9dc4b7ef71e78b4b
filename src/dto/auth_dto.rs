use serde::{Deserialize, Serialize};
use validator::Validate;

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 100))]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: Option<String>,
    pub message: Option<String>,
    pub customer_id: Option<String>,
}

impl LoginResponse {
    pub fn success(token: String, customer_id: String) -> Self {
        Self {
            success: true,
            token: Some(token),
            message: None,
            customer_id: Some(customer_id),
        }
    }
}
