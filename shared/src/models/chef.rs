//! Chef Model

use serde::{Deserialize, Serialize};

/// Chef entity (aşçı), shown in the public chef section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chef {
    pub id: String,
    pub name: String,
    pub biography: String,
    pub signature_dish: String,
    pub image_url: String,
}

/// Insert/update payload for a chef
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChefInput {
    pub name: String,
    pub biography: String,
    pub signature_dish: String,
    pub image_url: String,
}

