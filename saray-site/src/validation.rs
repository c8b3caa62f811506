//! Input validation helpers for public requests

use shared::{AppError, ErrorCode};

/// Names
pub const MAX_NAME_LEN: usize = 200;

/// Phone numbers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Required, non-blank and within the length limit; returns the trimmed value
pub fn required_text(value: &str, field: &str, max_len: usize) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::required(field));
    }
    if value.chars().count() > max_len {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} is too long (max {max_len})"),
        )
        .with_detail("field", field));
    }
    Ok(value.to_string())
}

/// Minimal email shape check: something on both sides of one '@'
pub fn email(value: &str, field: &str) -> Result<String, AppError> {
    let value = required_text(value, field, MAX_EMAIL_LEN)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(value)
        }
        _ => Err(
            AppError::with_message(ErrorCode::InvalidFormat, format!("{field} is not an email address"))
                .with_detail("field", field),
        ),
    }
}
