//! Field normalizer: raw rows in, canonical [`JobRecord`]s out.
//!
//! Every function here is total. Malformed input degrades to the field's
//! default (sentinel string, empty list, `None`, `false`) and is never
//! reported as an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::model::{JobRecord, RawRow, RawValue, NOT_SPECIFIED};

const TRUTHY: [&str; 5] = ["true", "1", "yes", "y", "oui"];

const LIST_DELIMITERS: [char; 3] = [',', ';', '|'];

/// Epoch milliseconds accepted as a date: 1973-03-03 to 2286-11-20.
/// Smaller numbers are more likely `YYYYMMDD` or a year than a timestamp.
const EPOCH_MILLIS_RANGE: std::ops::RangeInclusive<f64> = 1e11..=1e13;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%Y%m%d",
];

// ---------------------------------------------------------------------------
// Scalar parsers
// ---------------------------------------------------------------------------

/// Split a delimited list string.
///
/// One leading `[` and one trailing `]` are dropped, every `'` and `"` is
/// removed, then the rest is split on any of `,` `;` `|`. Pieces are trimmed
/// and empty ones discarded; order and duplicates are kept.
pub fn split_list(s: &str) -> Vec<String> {
    let s = s.trim();
    if s.is_empty() || s == "[]" {
        return Vec::new();
    }
    let s = s.strip_prefix('[').unwrap_or(s);
    let s = s.strip_suffix(']').unwrap_or(s);
    let unquoted: String = s.chars().filter(|c| *c != '\'' && *c != '"').collect();
    unquoted
        .split(LIST_DELIMITERS)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// List field from any raw value. Native JSON arrays keep their elements.
pub fn parse_list(val: Option<&RawValue>) -> Vec<String> {
    match val {
        None | Some(RawValue::Null) => Vec::new(),
        Some(RawValue::List(items)) => items
            .iter()
            .filter_map(RawValue::as_text)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(other) => other.as_text().map(|s| split_list(&s)).unwrap_or_default(),
    }
}

/// Lossy boolean: only the truthy tokens (and native `true`) give `true`.
pub fn to_bool(val: Option<&RawValue>) -> bool {
    match val {
        Some(RawValue::Bool(b)) => *b,
        None | Some(RawValue::Null) | Some(RawValue::List(_)) => false,
        Some(other) => other
            .as_text()
            .map(|s| TRUTHY.contains(&s.trim().to_lowercase().as_str()))
            .unwrap_or(false),
    }
}

/// Finite number or `None`. Empty text is absent, never zero.
pub fn to_number(val: Option<&RawValue>) -> Option<f64> {
    let n = match val? {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        RawValue::Bool(_) | RawValue::List(_) | RawValue::Null => return None,
    };
    n.is_finite().then_some(n)
}

/// Calendar date from the common textual layouts, or epoch milliseconds.
pub fn parse_date(val: Option<&RawValue>) -> Option<NaiveDate> {
    match val? {
        RawValue::Number(ms) if EPOCH_MILLIS_RANGE.contains(ms) => {
            DateTime::from_timestamp_millis(*ms as i64).map(|dt| dt.date_naive())
        }
        RawValue::Text(s) => parse_date_str(s.trim()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

// ---------------------------------------------------------------------------
// Source-specific parsers
// ---------------------------------------------------------------------------

/// The two load paths. Each maps its own raw field names onto the one
/// canonical record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Job explorer feed: one posting per row, always carries an id.
    JobsFeed,
    /// Statistics feed: salary co-fields, optional id.
    StatsFeed,
}

/// Raw field names (first non-empty wins) and defaults for one source.
struct FieldKeys {
    id: &'static [&'static str],
    title: &'static [&'static str],
    company: &'static [&'static str],
    company_default: &'static str,
    country: &'static [&'static str],
    location: &'static [&'static str],
    seniority: &'static [&'static str],
    education: &'static [&'static str],
    source: &'static [&'static str],
    source_default: &'static str,
    description: &'static [&'static str],
    link: &'static [&'static str],
    salary: &'static [&'static str],
    currency: &'static [&'static str],
    salary_type: &'static [&'static str],
    experience: &'static [&'static str],
    hybrid: &'static [&'static str],
    visa: &'static [&'static str],
    technical_skills: &'static [&'static str],
    tools: &'static [&'static str],
    domains: &'static [&'static str],
    soft_skills: &'static [&'static str],
    tasks: &'static [&'static str],
    benefits: &'static [&'static str],
    date: &'static [&'static str],
}

const JOBS_FEED_KEYS: FieldKeys = FieldKeys {
    id: &["id"],
    title: &["title"],
    company: &["company"],
    company_default: "Confidential",
    country: &["country"],
    location: &["location"],
    seniority: &["seniority", "seniority_level"],
    education: &["education", "education_level"],
    source: &["source"],
    source_default: "",
    description: &["description"],
    link: &["link"],
    salary: &["salary", "salary_value"],
    currency: &["salary_currency", "currency"],
    salary_type: &["salary_type"],
    experience: &["experience_years"],
    hybrid: &["hybrid", "hybrid_policy"],
    visa: &["visa", "visa_sponsorship"],
    technical_skills: &["technical_skills"],
    tools: &["tools", "tools_used"],
    domains: &["domains"],
    soft_skills: &["soft_skills"],
    tasks: &["tasks"],
    benefits: &["benefits"],
    date: &["date_posted", "date"],
};

const STATS_FEED_KEYS: FieldKeys = FieldKeys {
    id: &["id"],
    title: &["title", "job_title"],
    company: &["company"],
    company_default: "Unknown",
    country: &["country"],
    location: &["location"],
    seniority: &["seniority_level"],
    education: &["education_level"],
    source: &["source"],
    source_default: "N/A",
    description: &["description_sans_html", "description"],
    link: &["link"],
    salary: &["salary_value"],
    currency: &["salary_currency"],
    salary_type: &["salary_type"],
    experience: &["experience_years"],
    hybrid: &["hybrid_policy"],
    visa: &["visa_sponsorship"],
    technical_skills: &["technical_skills"],
    tools: &["tools_used"],
    domains: &["domains"],
    soft_skills: &["soft_skills"],
    tasks: &["tasks"],
    benefits: &["benefits"],
    date: &["date_posted"],
};

impl SourceKind {
    fn keys(self) -> &'static FieldKeys {
        match self {
            SourceKind::JobsFeed => &JOBS_FEED_KEYS,
            SourceKind::StatsFeed => &STATS_FEED_KEYS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SourceKind::JobsFeed => "jobs feed",
            SourceKind::StatsFeed => "stats feed",
        }
    }

    /// Normalize one raw row. `position` is the 0-based row index, used as a
    /// fallback id on the jobs feed.
    pub fn normalize(self, row: &RawRow, position: usize) -> JobRecord {
        let k = self.keys();
        let id = to_number(first_present(row, k.id))
            .filter(|n| n.fract() == 0.0)
            .map(|n| n as i64);
        let id = match self {
            SourceKind::JobsFeed => id.or(Some(position as i64 + 1)),
            SourceKind::StatsFeed => id,
        };

        JobRecord {
            id,
            title: text_or(row, k.title, "Untitled"),
            company: text_or(row, k.company, k.company_default),
            country: text_or(row, k.country, NOT_SPECIFIED),
            location: text_or(row, k.location, NOT_SPECIFIED),
            seniority_level: text_or(row, k.seniority, NOT_SPECIFIED),
            education_level: text_or(row, k.education, NOT_SPECIFIED),
            source: text_or(row, k.source, k.source_default),
            description: text_or(row, k.description, "No description provided."),
            link: text_or(row, k.link, ""),

            salary_value: to_number(first_present(row, k.salary)),
            salary_currency: text_or(row, k.currency, "").to_uppercase(),
            salary_type: text_or(row, k.salary_type, "").to_lowercase(),
            experience_years: to_number(first_present(row, k.experience)),

            hybrid_policy: to_bool(first_present(row, k.hybrid)),
            visa_sponsorship: to_bool(first_present(row, k.visa)),

            technical_skills: parse_list(first_present(row, k.technical_skills)),
            tools_used: parse_list(first_present(row, k.tools)),
            domains: parse_list(first_present(row, k.domains)),
            soft_skills: parse_list(first_present(row, k.soft_skills)),
            tasks: parse_list(first_present(row, k.tasks)),
            benefits: parse_list(first_present(row, k.benefits)),

            date: parse_date(first_present(row, k.date)),
        }
    }
}

/// First key whose value is present and not blank text.
fn first_present<'a>(row: &'a RawRow, keys: &[&str]) -> Option<&'a RawValue> {
    keys.iter().filter_map(|key| row.get(*key)).find(|val| match val {
        RawValue::Null => false,
        RawValue::Text(s) => !s.trim().is_empty(),
        _ => true,
    })
}

fn text_or(row: &RawRow, keys: &[&str], default: &str) -> String {
    first_present(row, keys)
        .and_then(RawValue::as_text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}
