//! Login form

use crate::error::{AdminError, AdminResult};
use crate::session::SessionGate;

pub const WRONG_PASSWORD: &str = "Wrong password";
pub const EMPTY_PASSWORD: &str = "Enter the admin password";

/// Password entry with an inline error line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub password: String,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Submit the typed password to the gate
    ///
    /// A wrong or empty password leaves the gate logged out, sets the inline
    /// error and clears the field. Storage failures are returned as-is.
    pub fn submit(&mut self, gate: &mut SessionGate) -> AdminResult<()> {
        let password = std::mem::take(&mut self.password);
        if password.is_empty() {
            self.error = Some(EMPTY_PASSWORD.to_string());
            return Err(AdminError::AuthFailed);
        }
        if gate.login(&password)? {
            self.error = None;
            Ok(())
        } else {
            self.error = Some(WRONG_PASSWORD.to_string());
            Err(AdminError::AuthFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, PasswordCheck};

    fn gate() -> SessionGate {
        SessionGate::new(PasswordCheck::Plain("topkapi".into()), MemorySessionStore::new())
    }

    #[test]
    fn test_wrong_password_clears_field_and_sets_error() {
        let mut gate = gate();
        let mut form = LoginForm::new();
        form.set_password("galata");

        assert!(matches!(form.submit(&mut gate), Err(AdminError::AuthFailed)));
        assert!(!gate.is_authenticated());
        assert_eq!(form.error.as_deref(), Some(WRONG_PASSWORD));
        assert!(form.password.is_empty());
    }

    #[test]
    fn test_empty_password_skips_gate() {
        let mut gate = gate();
        let mut form = LoginForm::new();
        assert!(form.submit(&mut gate).is_err());
        assert_eq!(form.error.as_deref(), Some(EMPTY_PASSWORD));
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut gate = gate();
        let mut form = LoginForm::new();
        form.set_password("x");
        let _ = form.submit(&mut gate);

        form.set_password("topkapi");
        form.submit(&mut gate).unwrap();
        assert!(gate.is_authenticated());
        assert_eq!(form.error, None);
        assert!(form.password.is_empty());
    }
}
