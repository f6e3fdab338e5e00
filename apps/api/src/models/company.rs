use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub location: String,
}

impl NewCompany {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("company name cannot be empty".to_string());
        }
        if self.location.trim().is_empty() {
            return Err("company location cannot be empty".to_string());
        }
        Ok(())
    }
}
