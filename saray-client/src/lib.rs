//! Saray Client - access to the hosted restaurant database
//!
//! [`ResourceClient`] is the table-oriented contract the admin panel and the
//! site service depend on. [`RestClient`] talks to the hosted PostgREST API;
//! [`MemoryClient`] keeps rows in memory and records every call.

pub mod client;
pub mod config;
pub mod error;
pub mod memory;
pub mod rest;

pub use client::ResourceClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use memory::{MemoryClient, Operation, RemoteCall};
pub use rest::RestClient;

// Re-export shared types for convenience
pub use shared::{Record, RecordInput, ResourceKind};
