//! Criteria evaluator: decides whether one application qualifies for one job.
//!
//! Algorithm:
//! 1. Hard gates, checked in order, the first failure ends evaluation:
//!    salary ≤ budget, notice period within range, experience within range.
//! 2. Soft criteria: one point per id set (location, technology, work mode,
//!    qualification, shift, job type) that shares at least one id with the job.
//! 3. Matched iff every hard gate passed and points ≥ `SOFT_MATCH_THRESHOLD`.
//!
//! An empty set on either side never overlaps. There is no "any" wildcard.

use crate::matching::criteria::{Applicant, Application, JobCriteria, SoftCriterion};

/// Minimum number of overlapping soft criteria (out of 6) for a match.
pub const SOFT_MATCH_THRESHOLD: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardGate {
    Salary,
    NoticePeriod,
    Experience,
}

impl HardGate {
    pub fn as_str(&self) -> &'static str {
        match self {
            HardGate::Salary => "salary",
            HardGate::NoticePeriod => "notice_period",
            HardGate::Experience => "experience",
        }
    }
}

/// Why an application did or did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchBreakdown {
    /// First hard gate that failed. Soft criteria are not checked when set.
    pub failed_gate: Option<HardGate>,
    pub overlapping: Vec<SoftCriterion>,
}

impl MatchBreakdown {
    pub fn points(&self) -> usize {
        self.overlapping.len()
    }

    pub fn matched(&self) -> bool {
        self.failed_gate.is_none() && self.points() >= SOFT_MATCH_THRESHOLD
    }

    /// Comma-separated names of the overlapping criteria, for logs.
    pub fn overlapping_names(&self) -> String {
        self.overlapping
            .iter()
            .map(|criterion| criterion.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub applicant: Applicant,
    pub matched: bool,
}

impl Evaluation {
    pub fn from_breakdown(application: &Application, report: &MatchBreakdown) -> Self {
        Self {
            applicant: application.applicant(),
            matched: report.matched(),
        }
    }
}

pub fn evaluate(application: &Application, job: &JobCriteria) -> Evaluation {
    Evaluation::from_breakdown(application, &breakdown(application, job))
}

pub fn breakdown(application: &Application, job: &JobCriteria) -> MatchBreakdown {
    if let Some(gate) = failed_hard_gate(application, job) {
        return MatchBreakdown {
            failed_gate: Some(gate),
            overlapping: vec![],
        };
    }

    let overlapping = SoftCriterion::ALL
        .into_iter()
        .filter(|&criterion| !job.ids(criterion).is_disjoint(application.ids(criterion)))
        .collect();

    MatchBreakdown {
        failed_gate: None,
        overlapping,
    }
}

fn failed_hard_gate(application: &Application, job: &JobCriteria) -> Option<HardGate> {
    if application.expected_salary > job.budget {
        return Some(HardGate::Salary);
    }
    if !job.notice_period.contains(application.notice_period) {
        return Some(HardGate::NoticePeriod);
    }
    if !job.experience.contains(application.experience) {
        return Some(HardGate::Experience);
    }
    None
}
