use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// RawValue – a single cell as it arrived from the source
// ---------------------------------------------------------------------------

/// An untyped source value. CSV cells are always `Text`; JSON keeps its own
/// scalar kinds so that native booleans and numbers survive until normalisation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Bool(bool),
    List(Vec<RawValue>),
    Null,
}

impl RawValue {
    /// Stringified form used by the normalizer. `Null` has none.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Text(s) => Some(s.clone()),
            RawValue::Number(n) => Some(format_number(*n)),
            RawValue::Bool(b) => Some(b.to_string()),
            RawValue::List(items) => Some(
                items
                    .iter()
                    .filter_map(RawValue::as_text)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            RawValue::Null => None,
        }
    }
}

impl From<&serde_json::Value> for RawValue {
    fn from(val: &serde_json::Value) -> Self {
        use serde_json::Value;
        match val {
            Value::String(s) => RawValue::Text(s.clone()),
            Value::Number(n) => n.as_f64().map_or(RawValue::Null, RawValue::Number),
            Value::Bool(b) => RawValue::Bool(*b),
            Value::Array(items) => RawValue::List(items.iter().map(RawValue::from).collect()),
            Value::Null => RawValue::Null,
            other @ Value::Object(_) => RawValue::Text(other.to_string()),
        }
    }
}

/// Integral floats print without the trailing `.0` so `1.0` reads as `"1"`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One source row: field name → value. Never mutated after load.
pub type RawRow = BTreeMap<String, RawValue>;

// ---------------------------------------------------------------------------
// YearMonth – calendar bucket for time series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the month, for plotting on a date axis.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Months since year 0; a continuous x coordinate.
    pub fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    pub fn from_ordinal(ordinal: i64) -> Self {
        YearMonth {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ---------------------------------------------------------------------------
// JobRecord – the canonical record
// ---------------------------------------------------------------------------

pub const NOT_SPECIFIED: &str = "Not specified";

/// One normalized job posting. Built once per load by the normalizer and only
/// ever read afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobRecord {
    pub id: Option<i64>,
    pub title: String,
    pub company: String,
    pub country: String,
    pub location: String,
    pub seniority_level: String,
    pub education_level: String,
    pub source: String,
    pub description: String,
    pub link: String,

    pub salary_value: Option<f64>,
    pub salary_currency: String,
    pub salary_type: String,
    pub experience_years: Option<f64>,

    pub hybrid_policy: bool,
    pub visa_sponsorship: bool,

    pub technical_skills: Vec<String>,
    pub tools_used: Vec<String>,
    pub domains: Vec<String>,
    pub soft_skills: Vec<String>,
    pub tasks: Vec<String>,
    pub benefits: Vec<String>,

    pub date: Option<NaiveDate>,
}

impl JobRecord {
    /// Salary eligible for statistics: annual, USD, strictly above `floor`.
    pub fn annual_usd_salary_above(&self, floor: f64) -> Option<f64> {
        match self.salary_value {
            Some(v) if self.salary_currency == "USD" && self.salary_type == "annual" && v > floor => {
                Some(v)
            }
            _ => None,
        }
    }

    pub fn month(&self) -> Option<YearMonth> {
        self.date.map(YearMonth::of)
    }
}

// ---------------------------------------------------------------------------
// JobDataset – the complete loaded collection
// ---------------------------------------------------------------------------

/// The in-memory record collection. Rebuilt wholesale on every load.
#[derive(Debug, Clone, Default)]
pub struct JobDataset {
    records: Vec<JobRecord>,
}

impl JobDataset {
    pub fn from_records(records: Vec<JobRecord>) -> Self {
        JobDataset { records }
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    /// Records at the given indices, in index order.
    pub fn select<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a JobRecord> + Clone + 'a {
        indices.iter().filter_map(|&i| self.records.get(i))
    }

    pub fn get(&self, index: usize) -> Option<&JobRecord> {
        self.records.get(index)
    }

    /// Earliest and latest posting month over the whole collection.
    pub fn month_range(&self) -> Option<(YearMonth, YearMonth)> {
        let mut months = self.records.iter().filter_map(JobRecord::month);
        let first = months.next()?;
        Some(months.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m))))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_month_ordinal_round_trips_across_year_boundary() {
        let dec = YearMonth { year: 2024, month: 12 };
        let jan = YearMonth::from_ordinal(dec.ordinal() + 1);
        assert_eq!(jan, YearMonth { year: 2025, month: 1 });
        assert_eq!(jan.to_string(), "2025-01");
    }

    #[test]
    fn annual_usd_salary_requires_both_co_filters() {
        let mut rec = JobRecord {
            salary_value: Some(50_000.0),
            salary_currency: "USD".into(),
            salary_type: "annual".into(),
            ..Default::default()
        };
        assert_eq!(rec.annual_usd_salary_above(20_000.0), Some(50_000.0));
        assert_eq!(rec.annual_usd_salary_above(50_000.0), None);
        rec.salary_currency = "EUR".into();
        assert_eq!(rec.annual_usd_salary_above(20_000.0), None);
    }

    #[test]
    fn month_range_skips_undated_records() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day);
        let ds = JobDataset::from_records(vec![
            JobRecord { date: d(2024, 3, 5), ..Default::default() },
            JobRecord { date: None, ..Default::default() },
            JobRecord { date: d(2023, 11, 30), ..Default::default() },
        ]);
        let (lo, hi) = ds.month_range().unwrap();
        assert_eq!(lo, YearMonth { year: 2023, month: 11 });
        assert_eq!(hi, YearMonth { year: 2024, month: 3 });
    }

    #[test]
    fn json_numbers_stringify_without_fraction() {
        let v = RawValue::from(&serde_json::json!(1));
        assert_eq!(v.as_text().as_deref(), Some("1"));
    }
}
