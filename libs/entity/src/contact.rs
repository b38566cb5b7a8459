use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact-form submission. Immutable once persisted; there is no update
/// or delete path.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
