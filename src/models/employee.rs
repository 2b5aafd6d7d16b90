use serde::{Deserialize, Serialize};

/// An employee record.
///
/// `id` is assigned by the store on first save and never changes afterwards.
/// Records read back from the database always carry `Some(id)`; a value
/// built from request input may not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all stored employees.
    pub email: String,
}

impl Employee {
    /// Build an unsaved employee (no identifier yet).
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
