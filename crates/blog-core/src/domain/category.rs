use serde::{Deserialize, Serialize};

/// Category entity - a label posts can be grouped under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
}
