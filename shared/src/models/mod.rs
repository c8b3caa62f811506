//! Data models
//!
//! Records as stored by the hosted database, plus the payloads written on
//! insert/update. Ids are opaque, server-assigned strings.

pub mod chef;
pub mod menu_item;
pub mod reservation;
pub mod table;

pub use chef::*;
pub use menu_item::*;
pub use reservation::*;
pub use table::*;
