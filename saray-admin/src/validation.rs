//! Form validation
//!
//! Turns a text-only [`FormState`] into a typed [`RecordInput`]. This is the
//! only place numeric fields are parsed; input that does not parse is
//! rejected, never coerced.

use rust_decimal::Decimal;
use shared::{ErrorCode, RecordInput};
use shared::models::{ChefInput, DiningTableInput, MenuCategory, MenuItemInput, TableStatus};
use std::fmt;
use std::str::FromStr;

use crate::form::{ChefForm, FormState, MenuItemForm, TableForm};

// ── Text length limits ──────────────────────────────────────────────

/// Names, locations, signature dishes
pub const MAX_NAME_LEN: usize = 200;

/// Biographies and dish descriptions
pub const MAX_NOTE_LEN: usize = 2000;

/// Image URLs
pub const MAX_URL_LEN: usize = 2048;

/// What is wrong with one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    Missing,
    TooLong { max: usize },
    NotAWholeNumber,
    NotPositive,
    NotAPrice,
    NegativePrice,
    UnknownStatus,
    UnknownCategory,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("is required"),
            Self::TooLong { max } => write!(f, "is too long (max {max})"),
            Self::NotAWholeNumber => f.write_str("must be a whole number"),
            Self::NotPositive => f.write_str("must be greater than zero"),
            Self::NotAPrice => f.write_str("must be a number"),
            Self::NegativePrice => f.write_str("must not be negative"),
            Self::UnknownStatus => f.write_str("must be available, reserved or occupied"),
            Self::UnknownCategory => f.write_str("must be one of the menu categories"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub problem: Problem,
}

/// Rejected form input, one issue per offending field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn has_issue(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }

    /// True if only required fields are missing
    pub fn only_missing(&self) -> bool {
        self.issues.iter().all(|i| i.problem == Problem::Missing)
    }

    /// Error code of the first issue that is more than a missing field
    pub fn code(&self) -> ErrorCode {
        let Some(issue) = self.issues.iter().find(|i| i.problem != Problem::Missing) else {
            return ErrorCode::RequiredField;
        };
        match (issue.field, &issue.problem) {
            (_, Problem::NotAPrice | Problem::NegativePrice) => ErrorCode::MenuItemInvalidPrice,
            (_, Problem::UnknownCategory) => ErrorCode::MenuCategoryUnknown,
            (_, Problem::UnknownStatus) => ErrorCode::TableStatusUnknown,
            ("table_number", Problem::NotAWholeNumber | Problem::NotPositive) => {
                ErrorCode::TableInvalidNumber
            }
            ("capacity", Problem::NotAWholeNumber | Problem::NotPositive) => {
                ErrorCode::TableInvalidCapacity
            }
            _ => ErrorCode::ValidationFailed,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.only_missing() {
            f.write_str("Please fill in all required fields: ")?;
            let names: Vec<&str> = self.issues.iter().map(|i| i.field).collect();
            return f.write_str(&names.join(", "));
        }
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|i| format!("{} {}", i.field, i.problem))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Collects issues while fields are checked in order
#[derive(Default)]
struct Checker {
    issues: Vec<FieldIssue>,
}

impl Checker {
    fn fail(&mut self, field: &'static str, problem: Problem) {
        self.issues.push(FieldIssue { field, problem });
    }

    /// Required text, trimmed
    fn text(&mut self, field: &'static str, value: &str, max_len: usize) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.fail(field, Problem::Missing);
        } else if value.chars().count() > max_len {
            self.fail(field, Problem::TooLong { max: max_len });
        }
        value.to_string()
    }

    /// Required integer greater than zero
    fn positive_int(&mut self, field: &'static str, value: &str) -> i32 {
        let value = value.trim();
        if value.is_empty() {
            self.fail(field, Problem::Missing);
            return 0;
        }
        match value.parse::<i32>() {
            Ok(n) if n > 0 => n,
            Ok(_) => {
                self.fail(field, Problem::NotPositive);
                0
            }
            Err(_) => {
                self.fail(field, Problem::NotAWholeNumber);
                0
            }
        }
    }

    /// Required decimal >= 0; a comma is accepted as the decimal separator
    fn price(&mut self, field: &'static str, value: &str) -> Decimal {
        let value = value.trim();
        if value.is_empty() {
            self.fail(field, Problem::Missing);
            return Decimal::ZERO;
        }
        match Decimal::from_str(&value.replace(',', ".")) {
            Ok(price) if price.is_sign_negative() && !price.is_zero() => {
                self.fail(field, Problem::NegativePrice);
                Decimal::ZERO
            }
            Ok(price) => price,
            Err(_) => {
                self.fail(field, Problem::NotAPrice);
                Decimal::ZERO
            }
        }
    }

    /// Optional choice, blank means the default
    fn choice<T: FromStr + Default>(&mut self, field: &'static str, value: &str, problem: Problem) -> T {
        let value = value.trim();
        if value.is_empty() {
            return T::default();
        }
        value.parse().unwrap_or_else(|_| {
            self.fail(field, problem);
            T::default()
        })
    }

    fn finish(self, input: RecordInput) -> Result<RecordInput, ValidationError> {
        if self.issues.is_empty() {
            Ok(input)
        } else {
            Err(ValidationError {
                issues: self.issues,
            })
        }
    }
}

/// Validate a form and build the payload to send
pub fn validate(form: &FormState) -> Result<RecordInput, ValidationError> {
    match form {
        FormState::Table(f) => validate_table(f),
        FormState::Chef(f) => validate_chef(f),
        FormState::MenuItem(f) => validate_menu_item(f),
    }
}

fn validate_table(form: &TableForm) -> Result<RecordInput, ValidationError> {
    let mut check = Checker::default();
    let table_number = check.positive_int("table_number", &form.table_number);
    let capacity = check.positive_int("capacity", &form.capacity);
    let location = check.text("location", &form.location, MAX_NAME_LEN);
    let status: TableStatus = check.choice("status", &form.status, Problem::UnknownStatus);
    check.finish(RecordInput::Table(DiningTableInput {
        table_number,
        capacity,
        location,
        status,
    }))
}

fn validate_chef(form: &ChefForm) -> Result<RecordInput, ValidationError> {
    let mut check = Checker::default();
    let name = check.text("name", &form.name, MAX_NAME_LEN);
    let biography = check.text("biography", &form.biography, MAX_NOTE_LEN);
    let signature_dish = check.text("signature_dish", &form.signature_dish, MAX_NAME_LEN);
    let image_url = check.text("image_url", &form.image_url, MAX_URL_LEN);
    check.finish(RecordInput::Chef(ChefInput {
        name,
        biography,
        signature_dish,
        image_url,
    }))
}

fn validate_menu_item(form: &MenuItemForm) -> Result<RecordInput, ValidationError> {
    let mut check = Checker::default();
    let name = check.text("name", &form.name, MAX_NAME_LEN);
    let description = check.text("description", &form.description, MAX_NOTE_LEN);
    let price = check.price("price", &form.price);
    let category: MenuCategory =
        check.choice("category", &form.category, Problem::UnknownCategory);
    let image_url = check.text("image_url", &form.image_url, MAX_URL_LEN);
    check.finish(RecordInput::MenuItem(MenuItemInput {
        name,
        description,
        price,
        category,
        image_url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ResourceKind;

    fn filled_table() -> FormState {
        FormState::Table(TableForm {
            table_number: "4".into(),
            capacity: "6".into(),
            location: " Teras ".into(),
            status: "Rezerveli".into(),
        })
    }

    #[test]
    fn test_table_parses_numbers_and_trims_text() {
        match validate(&filled_table()).unwrap() {
            RecordInput::Table(t) => {
                assert_eq!(t.table_number, 4);
                assert_eq!(t.capacity, 6);
                assert_eq!(t.location, "Teras");
                assert_eq!(t.status, TableStatus::Reserved);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_error_code_follows_first_bad_field() {
        let mut form = filled_table();
        form.set("location", "").unwrap();
        assert_eq!(validate(&form).unwrap_err().code(), ErrorCode::RequiredField);

        form.set("capacity", "-2").unwrap();
        assert_eq!(validate(&form).unwrap_err().code(), ErrorCode::TableInvalidCapacity);

        form.set("table_number", "A1").unwrap();
        assert_eq!(validate(&form).unwrap_err().code(), ErrorCode::TableInvalidNumber);

        let mut form = filled_table();
        form.set("status", "kapalı").unwrap();
        assert_eq!(validate(&form).unwrap_err().code(), ErrorCode::TableStatusUnknown);

        let mut menu = FormState::empty(ResourceKind::MenuItems).unwrap();
        menu.set("name", "Mercimek").unwrap();
        menu.set("description", "Çorba").unwrap();
        menu.set("price", "ücretsiz").unwrap();
        assert_eq!(validate(&menu).unwrap_err().code(), ErrorCode::MenuItemInvalidPrice);

        menu.set("price", "80").unwrap();
        menu.set("category", "İçecekler").unwrap();
        assert_eq!(validate(&menu).unwrap_err().code(), ErrorCode::MenuCategoryUnknown);
    }

    #[test]
    fn test_non_numeric_is_rejected_not_zeroed() {
        let mut form = filled_table();
        form.set("capacity", "dört").unwrap();
        form.set("table_number", "0").unwrap();
        let err = validate(&form).unwrap_err();
        assert_eq!(
            err.issues,
            vec![
                FieldIssue {
                    field: "table_number",
                    problem: Problem::NotPositive
                },
                FieldIssue {
                    field: "capacity",
                    problem: Problem::NotAWholeNumber
                },
            ]
        );
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut form = FormState::empty(ResourceKind::Chefs).unwrap();
        form.set("name", "   ").unwrap();
        let err = validate(&form).unwrap_err();
        assert!(err.only_missing());
        assert_eq!(err.issues.len(), 4);
        assert!(err.to_string().starts_with("Please fill in all required fields"));
    }

    #[test]
    fn test_price_rules() {
        let mut form = FormState::empty(ResourceKind::MenuItems).unwrap();
        form.set("name", "Mercimek Çorbası").unwrap();
        form.set("description", "Süzme").unwrap();
        form.set("image_url", "https://x/m.jpg").unwrap();

        form.set("price", "-5").unwrap();
        assert!(validate(&form).unwrap_err().has_issue("price"));

        form.set("price", "abc").unwrap();
        assert!(validate(&form).unwrap_err().has_issue("price"));

        form.set("price", "0").unwrap();
        assert!(validate(&form).is_ok());

        form.set("price", "89,90").unwrap();
        match validate(&form).unwrap() {
            RecordInput::MenuItem(m) => {
                assert_eq!(m.price, Decimal::new(8990, 2));
                assert_eq!(m.category, MenuCategory::PalaceStarters);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_category_and_status() {
        let mut form = filled_table();
        form.set("status", "broken").unwrap();
        let err = validate(&form).unwrap_err();
        assert_eq!(err.issues[0].problem, Problem::UnknownStatus);

        let mut menu = FormState::empty(ResourceKind::MenuItems).unwrap();
        menu.set("category", "Çorbalar").unwrap();
        assert!(validate(&menu).unwrap_err().has_issue("category"));
    }

    #[test]
    fn test_text_length_limit() {
        let mut form = FormState::empty(ResourceKind::Chefs).unwrap();
        for field in ["biography", "signature_dish", "image_url"] {
            form.set(field, "x").unwrap();
        }
        form.set("name", "a".repeat(MAX_NAME_LEN + 1)).unwrap();
        let err = validate(&form).unwrap_err();
        assert_eq!(
            err.issues[0].problem,
            Problem::TooLong { max: MAX_NAME_LEN }
        );
    }
}
