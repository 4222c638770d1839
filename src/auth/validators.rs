// src/auth/validators.rs

use super::models::SignInPayload;
use crate::common::{ValidationResult, Validator};

const MIN_PASSWORD_LEN: usize = 6;

pub struct SignInValidator;

impl Validator<SignInPayload> for SignInValidator {
    fn validate(&self, data: &SignInPayload) -> ValidationResult {
        let mut result = ValidationResult::new();

        let email = data.email.trim();
        if email.is_empty() {
            result.add_error("email", "Email is required");
        } else if !email.contains('@') {
            result.add_error("email", "Email must be a valid address");
        }

        if data.password.is_empty() {
            result.add_error("password", "Password is required");
        } else if data.password.len() < MIN_PASSWORD_LEN {
            result.add_error("password", "Password must be at least 6 characters");
        }

        result
    }
}
