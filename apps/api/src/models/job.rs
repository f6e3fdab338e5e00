use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::matching::criteria::{JobCriteria, Range};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub description: String,
    pub budget: i64,
    pub min_notice_period: i64,
    pub max_notice_period: i64,
    pub min_experience: i64,
    pub max_experience: i64,
    pub location_ids: Vec<i64>,
    pub technology_ids: Vec<i64>,
    pub work_mode_ids: Vec<i64>,
    pub qualification_ids: Vec<i64>,
    pub shift_ids: Vec<i64>,
    pub job_type_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// The matching snapshot of this posting; duplicate ids collapse.
    pub fn criteria(&self) -> JobCriteria {
        JobCriteria {
            id: self.id,
            budget: self.budget,
            notice_period: Range::new(self.min_notice_period, self.max_notice_period),
            experience: Range::new(self.min_experience, self.max_experience),
            location_ids: self.location_ids.iter().copied().collect(),
            technology_ids: self.technology_ids.iter().copied().collect(),
            work_mode_ids: self.work_mode_ids.iter().copied().collect(),
            qualification_ids: self.qualification_ids.iter().copied().collect(),
            shift_ids: self.shift_ids.iter().copied().collect(),
            job_type_ids: self.job_type_ids.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub budget: i64,
    pub min_notice_period: i64,
    pub max_notice_period: i64,
    pub min_experience: i64,
    pub max_experience: i64,
    #[serde(default)]
    pub location_ids: Vec<i64>,
    #[serde(default)]
    pub technology_ids: Vec<i64>,
    #[serde(default)]
    pub work_mode_ids: Vec<i64>,
    #[serde(default)]
    pub qualification_ids: Vec<i64>,
    #[serde(default)]
    pub shift_ids: Vec<i64>,
    #[serde(default)]
    pub job_type_ids: Vec<i64>,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title cannot be empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("description cannot be empty".to_string());
        }
        if self.budget < 0 {
            return Err("budget cannot be negative".to_string());
        }
        if self.min_notice_period < 0 || self.min_notice_period > self.max_notice_period {
            return Err(format!(
                "notice period range [{}, {}] is invalid",
                self.min_notice_period, self.max_notice_period
            ));
        }
        if self.min_experience < 0 || self.min_experience > self.max_experience {
            return Err(format!(
                "experience range [{}, {}] is invalid",
                self.min_experience, self.max_experience
            ));
        }
        Ok(())
    }
}
