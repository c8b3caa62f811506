//! Saray Site - HTTP service behind the public restaurant site
//!
//! Serves the menu and chef list and takes reservation requests. All data
//! lives in the hosted database and is reached through
//! [`saray_client::ResourceClient`].

pub mod api;
pub mod config;
pub mod state;
pub mod validation;

pub use api::build_app;
pub use config::Config;
pub use state::AppState;
