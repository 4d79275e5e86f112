use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog entry as persisted and returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub versions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// An entry ready for insertion; the store stamps `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub id: String,
    pub name: String,
    pub description: String,
    pub versions: Vec<String>,
}

/// The mutable fields, replaced wholesale on update.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceChanges {
    pub name: String,
    pub description: String,
    pub versions: Vec<String>,
}

/// Client-submitted body for create. `id` and `created_at` are not part of
/// it and are dropped if present.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub versions: Option<Vec<String>>,
}

impl ServiceInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Field 'name' must not be empty".to_string());
        }
        Ok(())
    }

    pub fn into_new(self, id: String) -> NewService {
        NewService {
            id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            versions: self.versions.unwrap_or_default(),
        }
    }

}

/// Client-submitted body for update. Every field is optional; absent ones are
/// written back as empty, since update replaces all three mutable fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceUpdate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub versions: Option<Vec<String>>,
}

impl ServiceUpdate {
    pub fn into_changes(self) -> ServiceChanges {
        ServiceChanges {
            name: self.name,
            description: self.description.unwrap_or_default(),
            versions: self.versions.unwrap_or_default(),
        }
    }
}

impl Service {
    pub fn from_new(new: NewService, created_at: DateTime<Utc>) -> Self {
        Self {
            id: new.id,
            name: new.name,
            description: new.description,
            versions: new.versions,
            created_at,
        }
    }

    pub fn apply(&mut self, changes: ServiceChanges) {
        self.name = changes.name;
        self.description = changes.description;
        self.versions = changes.versions;
    }
}
