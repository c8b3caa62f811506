//! Session Gate
//!
//! Checks the admin credential and persists the "authenticated" flag so a
//! restarted console stays logged in. The gate is owned by
//! [`crate::app::AdminApp`]; nothing here is global.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use serde::{Deserialize, Serialize};
use shared::security_log;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{AdminError, AdminResult};

/// Name of the persisted flag
pub const SESSION_FLAG: &str = "admin_authenticated";

/// Expected admin credential
#[derive(Clone)]
pub enum PasswordCheck {
    /// Plain value from `ADMIN_PASSWORD`
    Plain(String),
    /// Argon2 PHC string from `ADMIN_PASSWORD_HASH`
    Argon2(String),
}

impl std::fmt::Debug for PasswordCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain(_) => f.write_str("PasswordCheck::Plain(***)"),
            Self::Argon2(_) => f.write_str("PasswordCheck::Argon2(***)"),
        }
    }
}

impl PasswordCheck {
    pub fn verify(&self, credential: &str) -> bool {
        match self {
            Self::Plain(expected) => !expected.is_empty() && expected == credential,
            Self::Argon2(hash) => {
                let Ok(parsed) = PasswordHash::new(hash) else {
                    tracing::error!("Configured admin password hash is not a valid PHC string");
                    return false;
                };
                Argon2::default()
                    .verify_password(credential.as_bytes(), &parsed)
                    .is_ok()
            }
        }
    }

    /// Hash a password for `ADMIN_PASSWORD_HASH`
    pub fn hash(password: &str) -> AdminResult<String> {
        use argon2::PasswordHasher;
        use argon2::password_hash::SaltString;
        use argon2::password_hash::rand_core::OsRng;
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AdminError::Config(format!("password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }
}

/// Where the session flag lives between runs
pub trait SessionStore: Send {
    /// Stored flag; absent means logged out
    fn load(&self) -> std::io::Result<bool>;
    fn persist(&self, flag: bool) -> std::io::Result<()>;
    fn clear(&self) -> std::io::Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    admin_authenticated: bool,
}

/// Session flag stored at `{work_dir}/auth/session.json`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(work_dir: impl AsRef<Path>) -> Self {
        Self {
            path: work_dir.as_ref().join("auth").join("session.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> std::io::Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<SessionFile>(&content) {
            Ok(file) => Ok(file.admin_authenticated),
            Err(e) => {
                // An unreadable session file means logged out
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                Ok(false)
            }
        }
    }

    fn persist(&self, flag: bool) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&SessionFile {
            admin_authenticated: flag,
        })?;
        std::fs::write(&self.path, content)
    }

    fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Process-local store; clones share the flag
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    flag: Arc<AtomicBool>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> std::io::Result<bool> {
        Ok(self.is_set())
    }

    fn persist(&self, flag: bool) -> std::io::Result<()> {
        self.flag.store(flag, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> std::io::Result<()> {
        self.flag.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Credential check plus persisted authentication flag
pub struct SessionGate {
    check: PasswordCheck,
    store: Box<dyn SessionStore>,
    authenticated: bool,
}

impl SessionGate {
    /// A new gate starts logged out until [`SessionGate::load`] runs
    pub fn new(check: PasswordCheck, store: impl SessionStore + 'static) -> Self {
        Self {
            check,
            store: Box::new(store),
            authenticated: false,
        }
    }

    /// Restore the persisted flag
    pub fn load(&mut self) -> AdminResult<bool> {
        self.authenticated = self.store.load()?;
        if self.authenticated {
            tracing::info!(flag = SESSION_FLAG, "Restored admin session");
        }
        Ok(self.authenticated)
    }

    pub fn verify(&self, credential: &str) -> bool {
        self.check.verify(credential)
    }

    pub fn persist(&mut self, flag: bool) -> AdminResult<()> {
        self.store.persist(flag)?;
        self.authenticated = flag;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn clear(&mut self) -> AdminResult<()> {
        self.store.clear()?;
        self.authenticated = false;
        Ok(())
    }

    /// Verify and, on success, persist the session
    pub fn login(&mut self, credential: &str) -> AdminResult<bool> {
        if !self.verify(credential) {
            security_log!(WARN, "login_failed", reason = "wrong_password");
            return Ok(false);
        }
        self.persist(true)?;
        security_log!(INFO, "login_success");
        Ok(true)
    }

    pub fn logout(&mut self) -> AdminResult<()> {
        self.clear()?;
        security_log!(INFO, "logout");
        Ok(())
    }
}
