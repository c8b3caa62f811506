//! Saray Admin - back-office panel for the restaurant site
//!
//! # Module structure
//!
//! ```text
//! saray-admin/src/
//! ├── session.rs     # Session Gate: credential check + persisted flag
//! ├── login.rs       # login form
//! ├── form.rs        # text-only create/edit form state
//! ├── validation.rs  # form -> payload, numbers parsed here
//! ├── manager.rs     # Admin Resource Manager (tabs, forms, CRUD)
//! ├── app.rs         # root controller
//! ├── console.rs     # operator console commands and rendering
//! ├── config.rs      # environment configuration
//! └── error.rs
//! ```

pub mod app;
pub mod config;
pub mod console;
pub mod error;
pub mod form;
pub mod login;
pub mod manager;
pub mod session;
pub mod validation;

pub use app::AdminApp;
pub use config::Config;
pub use error::{AdminError, AdminResult};
pub use form::FormState;
pub use login::LoginForm;
pub use manager::{AdminResourceManager, Confirm, FetchTicket, Mutation, Notice, Synced};
pub use session::{FileSessionStore, MemorySessionStore, PasswordCheck, SessionGate, SessionStore};
pub use validation::ValidationError;

/// Create the work directory and start logging
pub fn setup_environment(config: &Config) -> std::io::Result<()> {
    std::fs::create_dir_all(&config.work_dir)?;
    shared::logger::init_logger_with_file(
        &config.log_level,
        config.log_json,
        Some(&config.log_dir()),
    )
}

pub fn print_banner() {
    println!(
        r#"
   _____
  / ___/____ __________ ___  __
  \__ \/ __ `/ ___/ __ `/ / / /
 ___/ / /_/ / /  / /_/ / /_/ /
/____/\__,_/_/   \__,_/\__, /   admin
                      /____/
    "#
    );
}
