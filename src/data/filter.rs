use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{JobDataset, JobRecord};

// ---------------------------------------------------------------------------
// Filter state: the user's current selection
// ---------------------------------------------------------------------------

/// Posting-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    AllTime,
    /// Postings dated within `days` before `anchor`, inclusive.
    /// Undated postings never match.
    LastDays { days: u32, anchor: NaiveDate },
}

/// Every active predicate. The default value filters nothing.
///
/// Empty sets, an empty text and a zero salary floor mean "no constraint".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub text: String,
    pub min_salary: f64,
    pub hybrid_only: bool,
    pub visa_only: bool,
    /// OR across the set.
    pub countries: BTreeSet<String>,
    /// AND across the set: every selected skill must be listed.
    pub skills: BTreeSet<String>,
    /// OR across the set.
    pub seniorities: BTreeSet<String>,
    /// OR across the set: any selected domain suffices.
    pub domains: BTreeSet<String>,
    pub period: Period,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        *self == FilterState::default()
    }

    /// Whether `rec` passes every predicate.
    pub fn matches(&self, rec: &JobRecord) -> bool {
        self.text_matches(rec)
            && self.salary_matches(rec)
            && (!self.hybrid_only || rec.hybrid_policy)
            && (!self.visa_only || rec.visa_sponsorship)
            && (self.countries.is_empty() || self.countries.contains(&rec.country))
            && (self.seniorities.is_empty() || self.seniorities.contains(&rec.seniority_level))
            && self.skills.iter().all(|s| rec.technical_skills.contains(s))
            && (self.domains.is_empty() || self.domains.iter().any(|d| rec.domains.contains(d)))
            && self.period_matches(rec)
    }

    fn text_matches(&self, rec: &JobRecord) -> bool {
        let needle = self.text.trim().to_lowercase();
        needle.is_empty()
            || rec.title.to_lowercase().contains(&needle)
            || rec.description.to_lowercase().contains(&needle)
    }

    fn salary_matches(&self, rec: &JobRecord) -> bool {
        self.min_salary <= 0.0 || rec.salary_value.is_some_and(|v| v >= self.min_salary)
    }

    fn period_matches(&self, rec: &JobRecord) -> bool {
        match self.period {
            Period::AllTime => true,
            Period::LastDays { days, anchor } => rec.date.is_some_and(|d| {
                let age = (anchor - d).num_days();
                (0..=i64::from(days)).contains(&age)
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// Records passing all predicates, in input order.
pub fn apply_filters<'a>(records: &'a [JobRecord], filters: &FilterState) -> Vec<&'a JobRecord> {
    records.iter().filter(|r| filters.matches(r)).collect()
}

/// Indices of the records passing all predicates.
pub fn filtered_indices(dataset: &JobDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| filters.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
