use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` bound used for notice period and experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min: i64,
    pub max: i64,
}

impl Range {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// The six id-set criteria shared by jobs and applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoftCriterion {
    Location,
    Technology,
    WorkMode,
    Qualification,
    Shift,
    JobType,
}

impl SoftCriterion {
    pub const ALL: [SoftCriterion; 6] = [
        SoftCriterion::Location,
        SoftCriterion::Technology,
        SoftCriterion::WorkMode,
        SoftCriterion::Qualification,
        SoftCriterion::Shift,
        SoftCriterion::JobType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoftCriterion::Location => "location",
            SoftCriterion::Technology => "technology",
            SoftCriterion::WorkMode => "work_mode",
            SoftCriterion::Qualification => "qualification",
            SoftCriterion::Shift => "shift",
            SoftCriterion::JobType => "job_type",
        }
    }
}

/// Immutable matching snapshot of one job posting.
///
/// This is the value stored in the job cache, serialized as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCriteria {
    pub id: i64,
    pub budget: i64,
    pub notice_period: Range,
    pub experience: Range,
    pub location_ids: BTreeSet<i64>,
    pub technology_ids: BTreeSet<i64>,
    pub work_mode_ids: BTreeSet<i64>,
    pub qualification_ids: BTreeSet<i64>,
    pub shift_ids: BTreeSet<i64>,
    pub job_type_ids: BTreeSet<i64>,
}

impl JobCriteria {
    pub fn ids(&self, criterion: SoftCriterion) -> &BTreeSet<i64> {
        match criterion {
            SoftCriterion::Location => &self.location_ids,
            SoftCriterion::Technology => &self.technology_ids,
            SoftCriterion::WorkMode => &self.work_mode_ids,
            SoftCriterion::Qualification => &self.qualification_ids,
            SoftCriterion::Shift => &self.shift_ids,
            SoftCriterion::JobType => &self.job_type_ids,
        }
    }
}

/// One applicant's submission for a job. Lives only for the matching request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub expected_salary: i64,
    pub notice_period: i64,
    pub experience: i64,
    #[serde(default)]
    pub location_ids: BTreeSet<i64>,
    #[serde(default)]
    pub technology_ids: BTreeSet<i64>,
    #[serde(default)]
    pub work_mode_ids: BTreeSet<i64>,
    #[serde(default)]
    pub qualification_ids: BTreeSet<i64>,
    #[serde(default)]
    pub shift_ids: BTreeSet<i64>,
    #[serde(default)]
    pub job_type_ids: BTreeSet<i64>,
}

impl Application {
    pub fn ids(&self, criterion: SoftCriterion) -> &BTreeSet<i64> {
        match criterion {
            SoftCriterion::Location => &self.location_ids,
            SoftCriterion::Technology => &self.technology_ids,
            SoftCriterion::WorkMode => &self.work_mode_ids,
            SoftCriterion::Qualification => &self.qualification_ids,
            SoftCriterion::Shift => &self.shift_ids,
            SoftCriterion::JobType => &self.job_type_ids,
        }
    }

    /// Required-field checks done at the HTTP boundary, before matching.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("application name cannot be empty".to_string());
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(format!(
                "application for '{}' has an invalid email",
                self.name
            ));
        }
        if self.age <= 0 {
            return Err(format!("application for '{}' has a non-positive age", self.name));
        }
        if self.expected_salary < 0 || self.notice_period < 0 || self.experience < 0 {
            return Err(format!(
                "application for '{}' has a negative salary, notice period or experience",
                self.name
            ));
        }
        Ok(())
    }

    pub fn applicant(&self) -> Applicant {
        Applicant {
            name: self.name.clone(),
            email: self.email.clone(),
            age: self.age,
        }
    }
}

/// Summary returned for an application that passed matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Applicant {
    pub name: String,
    pub email: String,
    pub age: i32,
}
