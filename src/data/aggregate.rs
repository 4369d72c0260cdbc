use std::collections::{BTreeSet, HashMap};

use super::model::{JobRecord, NOT_SPECIFIED};

// ---------------------------------------------------------------------------
// Field selector
// ---------------------------------------------------------------------------

/// Which record field to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Company,
    Country,
    Location,
    Seniority,
    Source,
    TechnicalSkills,
    Tools,
    Domains,
    SoftSkills,
    Tasks,
    Benefits,
}

impl Field {
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Field::TechnicalSkills
                | Field::Tools
                | Field::Domains
                | Field::SoftSkills
                | Field::Tasks
                | Field::Benefits
        )
    }

    /// The field's values on one record: one element for scalar fields.
    pub fn values(self, rec: &JobRecord) -> &[String] {
        match self {
            Field::Title => std::slice::from_ref(&rec.title),
            Field::Company => std::slice::from_ref(&rec.company),
            Field::Country => std::slice::from_ref(&rec.country),
            Field::Location => std::slice::from_ref(&rec.location),
            Field::Seniority => std::slice::from_ref(&rec.seniority_level),
            Field::Source => std::slice::from_ref(&rec.source),
            Field::TechnicalSkills => &rec.technical_skills,
            Field::Tools => &rec.tools_used,
            Field::Domains => &rec.domains,
            Field::SoftSkills => &rec.soft_skills,
            Field::Tasks => &rec.tasks,
            Field::Benefits => &rec.benefits,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

pub const OTHER_LABEL: &str = "Other";

/// One bucket: display label and occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateEntry {
    pub name: String,
    pub count: usize,
}

/// Count occurrences of `field` across `records`.
///
/// Buckets are keyed case-insensitively and labelled with the first-seen
/// casing. List elements each count once, repeats included. Blank values and
/// the `"Not specified"` sentinel are never counted. Output is in first-seen
/// order.
pub fn aggregate<'a, I>(records: I, field: Field) -> Vec<AggregateEntry>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut entries: Vec<AggregateEntry> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for rec in records {
        for raw in field.values(rec) {
            let value = raw.trim();
            if value.is_empty() || value == NOT_SPECIFIED {
                continue;
            }
            let slot = *slots.entry(value.to_lowercase()).or_insert_with(|| {
                entries.push(AggregateEntry {
                    name: value.to_string(),
                    count: 0,
                });
                entries.len() - 1
            });
            entries[slot].count += 1;
        }
    }
    entries
}

/// Sort descending by count (stable, so ties keep first-seen order) and keep
/// the first `n`.
pub fn top_n(mut entries: Vec<AggregateEntry>, n: usize) -> Vec<AggregateEntry> {
    sort_by_count(&mut entries);
    entries.truncate(n);
    entries
}

/// Keep the `cutoff` largest buckets and fold the rest into one `"Other"`
/// bucket. The fold is omitted when it would be empty.
pub fn fold_other(mut entries: Vec<AggregateEntry>, cutoff: usize) -> Vec<AggregateEntry> {
    sort_by_count(&mut entries);
    if entries.len() <= cutoff {
        return entries;
    }
    let rest: usize = entries.drain(cutoff..).map(|e| e.count).sum();
    if rest > 0 {
        entries.push(AggregateEntry {
            name: OTHER_LABEL.to_string(),
            count: rest,
        });
    }
    entries
}

fn sort_by_count(entries: &mut [AggregateEntry]) {
    entries.sort_by(|a, b| b.count.cmp(&a.count));
}

/// Sorted distinct values of `field`, for populating multi-select options.
pub fn unique_values<'a, I>(records: I, field: Field) -> Vec<String>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut set = BTreeSet::new();
    for rec in records {
        for v in field.values(rec) {
            if !v.is_empty() {
                set.insert(v.clone());
            }
        }
    }
    set.into_iter().collect()
}
