//! Derived metrics computed over a (usually filtered) record set.
//!
//! Each function is a pure pass over its input. Thresholds arrive as
//! arguments; callers take them from [`crate::config::ThresholdConfig`].

use std::collections::{BTreeMap, HashMap, HashSet};

use super::aggregate::{aggregate, top_n, AggregateEntry, Field};
use super::model::{JobDataset, JobRecord, YearMonth};

/// Canonical seniority order for the salary ladder.
pub const CAREER_ORDER: [&str; 7] = [
    "entry",
    "junior",
    "mid",
    "senior",
    "lead",
    "principal",
    "executive",
];

/// Median of a sample; the mean of the two middle values for even sizes.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

// ---------------------------------------------------------------------------
// Monthly volume
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyCount {
    pub month: YearMonth,
    pub count: usize,
}

/// Postings per calendar month, ascending. Undated records are skipped.
pub fn monthly_volume<'a, I>(records: I) -> Vec<MonthlyCount>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut months: BTreeMap<YearMonth, usize> = BTreeMap::new();
    for month in records.into_iter().filter_map(JobRecord::month) {
        *months.entry(month).or_default() += 1;
    }
    months
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}

/// Baseline and filtered volume on one shared time axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VolumeSeries {
    /// Month range of the full dataset; `None` when nothing is dated.
    pub axis: Option<(YearMonth, YearMonth)>,
    pub baseline: Vec<MonthlyCount>,
    pub filtered: Vec<MonthlyCount>,
}

pub fn volume_series<'a, I>(dataset: &'a JobDataset, filtered: I) -> VolumeSeries
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    VolumeSeries {
        axis: dataset.month_range(),
        baseline: monthly_volume(dataset.records()),
        filtered: monthly_volume(filtered),
    }
}

// ---------------------------------------------------------------------------
// Skill trends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SkillSeries {
    pub skill: String,
    /// Postings mentioning the skill, per month, ascending.
    pub points: Vec<MonthlyCount>,
    pub total: usize,
}

struct TrendBucket {
    label: String,
    months: BTreeMap<YearMonth, usize>,
    total: usize,
}

/// Per-skill monthly posting counts.
///
/// A posting counts at most once per skill, however many times it lists it.
/// With a `focus` skill only that series is returned (nothing if it never
/// occurs); otherwise the `top` skills by total, ties in first-seen order.
pub fn skill_trends<'a, I>(records: I, focus: Option<&str>, top: usize) -> Vec<SkillSeries>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut buckets: Vec<TrendBucket> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for rec in records {
        let Some(month) = rec.month() else {
            continue;
        };
        let mut seen: HashSet<String> = HashSet::new();
        for skill in &rec.technical_skills {
            let key = skill.to_lowercase();
            if !seen.insert(key.clone()) {
                continue;
            }
            let slot = *slots.entry(key).or_insert_with(|| {
                buckets.push(TrendBucket {
                    label: skill.clone(),
                    months: BTreeMap::new(),
                    total: 0,
                });
                buckets.len() - 1
            });
            let bucket = &mut buckets[slot];
            *bucket.months.entry(month).or_default() += 1;
            bucket.total += 1;
        }
    }

    let chosen: Vec<usize> = match focus {
        Some(skill) => slots.get(&skill.to_lowercase()).copied().into_iter().collect(),
        None => {
            let mut order: Vec<usize> = (0..buckets.len()).collect();
            order.sort_by(|&a, &b| buckets[b].total.cmp(&buckets[a].total));
            order.truncate(top);
            order
        }
    };

    chosen
        .into_iter()
        .map(|slot| {
            let bucket = &buckets[slot];
            SkillSeries {
                skill: bucket.label.clone(),
                points: bucket
                    .months
                    .iter()
                    .map(|(&month, &count)| MonthlyCount { month, count })
                    .collect(),
                total: bucket.total,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Skill value vs popularity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// Many mentions, salary at or below the median.
    Commodity,
    /// Few mentions, salary above the median.
    HiddenGem,
    /// Above both medians.
    Elite,
    /// At or below both medians.
    Niche,
}

impl Quadrant {
    /// A value equal to a median counts as below it.
    pub fn classify(mentions: f64, avg_salary: f64, median_mentions: f64, median_salary: f64) -> Self {
        match (mentions > median_mentions, avg_salary > median_salary) {
            (true, false) => Quadrant::Commodity,
            (false, true) => Quadrant::HiddenGem,
            (true, true) => Quadrant::Elite,
            (false, false) => Quadrant::Niche,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quadrant::Commodity => "Commodity",
            Quadrant::HiddenGem => "Hidden gem",
            Quadrant::Elite => "Elite",
            Quadrant::Niche => "Niche",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillValuePoint {
    pub skill: String,
    pub avg_salary: f64,
    pub mentions: usize,
    pub quadrant: Quadrant,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkillValueMap {
    pub points: Vec<SkillValuePoint>,
    pub median_mentions: Option<f64>,
    pub median_salary: Option<f64>,
}

/// Mean annual-USD salary and mention count per skill, over postings paid
/// strictly above `salary_floor`. Skills with fewer than `min_samples`
/// postings are dropped; the rest are classified against the medians of
/// both measures. Points are in first-seen order.
pub fn skill_value_map<'a, I>(records: I, salary_floor: f64, min_samples: usize) -> SkillValueMap
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    // label, salary sum, postings
    let mut stats: Vec<(String, f64, usize)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for rec in records {
        let Some(salary) = rec.annual_usd_salary_above(salary_floor) else {
            continue;
        };
        let mut seen: HashSet<String> = HashSet::new();
        for skill in &rec.technical_skills {
            let key = skill.to_lowercase();
            if !seen.insert(key.clone()) {
                continue;
            }
            let slot = *slots.entry(key).or_insert_with(|| {
                stats.push((skill.clone(), 0.0, 0));
                stats.len() - 1
            });
            stats[slot].1 += salary;
            stats[slot].2 += 1;
        }
    }

    let qualifying: Vec<(String, f64, usize)> = stats
        .into_iter()
        .filter(|(_, _, count)| *count >= min_samples)
        .map(|(skill, sum, count)| (skill, sum / count as f64, count))
        .collect();

    let median_mentions = median(&mut qualifying.iter().map(|q| q.2 as f64).collect::<Vec<_>>());
    let median_salary = median(&mut qualifying.iter().map(|q| q.1).collect::<Vec<_>>());

    let points = match (median_mentions, median_salary) {
        (Some(mm), Some(ms)) => qualifying
            .into_iter()
            .map(|(skill, avg_salary, mentions)| SkillValuePoint {
                quadrant: Quadrant::classify(mentions as f64, avg_salary, mm, ms),
                skill,
                avg_salary,
                mentions,
            })
            .collect(),
        _ => Vec::new(),
    };

    SkillValueMap {
        points,
        median_mentions,
        median_salary,
    }
}

// ---------------------------------------------------------------------------
// Seniority ladder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LadderRung {
    /// Lower-cased level from [`CAREER_ORDER`].
    pub level: String,
    pub median_salary: f64,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeniorityLadder {
    /// Rungs in career order.
    pub rungs: Vec<LadderRung>,
    /// Senior-or-lead median over entry-or-junior median, one decimal.
    pub multiplier: Option<f64>,
}

impl SeniorityLadder {
    pub fn multiplier_label(&self) -> String {
        match self.multiplier {
            Some(m) => format!("x{m:.1}"),
            None => "N/A".to_string(),
        }
    }

    fn rung(&self, levels: &[&str]) -> Option<&LadderRung> {
        self.rungs.iter().find(|r| levels.contains(&r.level.as_str()))
    }
}

/// Median annual-USD salary per canonical seniority level.
pub fn seniority_ladder<'a, I>(records: I, salary_floor: f64, min_samples: usize) -> SeniorityLadder
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut groups: HashMap<String, Vec<f64>> = HashMap::new();
    for rec in records {
        if let Some(salary) = rec.annual_usd_salary_above(salary_floor) {
            groups
                .entry(rec.seniority_level.trim().to_lowercase())
                .or_default()
                .push(salary);
        }
    }

    let rungs: Vec<LadderRung> = CAREER_ORDER
        .iter()
        .filter_map(|&level| {
            let salaries = groups.get_mut(level)?;
            if salaries.len() < min_samples {
                return None;
            }
            Some(LadderRung {
                level: level.to_string(),
                samples: salaries.len(),
                median_salary: median(salaries)?,
            })
        })
        .collect();

    let mut ladder = SeniorityLadder {
        rungs,
        multiplier: None,
    };
    if let (Some(junior), Some(senior)) = (
        ladder.rung(&["entry", "junior"]),
        ladder.rung(&["senior", "lead"]),
    ) {
        if junior.median_salary > 0.0 {
            let ratio = senior.median_salary / junior.median_salary;
            ladder.multiplier = Some((ratio * 10.0).round() / 10.0);
        }
    }
    ladder
}

// ---------------------------------------------------------------------------
// Headline KPIs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Kpis {
    pub total_postings: usize,
    pub distinct_companies: usize,
    pub distinct_countries: usize,
    pub median_salary: Option<f64>,
    pub top_skill: Option<String>,
}

impl Kpis {
    pub fn median_salary_label(&self) -> String {
        match self.median_salary {
            Some(m) => format!("${:.0}k", m / 1000.0),
            None => "N/A".to_string(),
        }
    }
}

pub fn kpis<'a, I>(records: I, salary_floor: f64) -> Kpis
where
    I: IntoIterator<Item = &'a JobRecord> + Clone,
{
    let mut total_postings = 0;
    let mut companies: HashSet<&str> = HashSet::new();
    let mut salaries = Vec::new();
    for rec in records.clone() {
        total_postings += 1;
        if !rec.company.is_empty() {
            companies.insert(rec.company.as_str());
        }
        if let Some(s) = rec.annual_usd_salary_above(salary_floor) {
            salaries.push(s);
        }
    }

    Kpis {
        total_postings,
        distinct_companies: companies.len(),
        distinct_countries: aggregate(records.clone(), Field::Country).len(),
        median_salary: median(&mut salaries),
        top_skill: top_n(aggregate(records, Field::TechnicalSkills), 1)
            .into_iter()
            .next()
            .map(|e| e.name),
    }
}

// ---------------------------------------------------------------------------
// Salary histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Equal-width bins over annual-USD salaries strictly between `floor` and
/// `ceiling`. The last bin is closed on the right.
pub fn salary_histogram<'a, I>(records: I, floor: f64, ceiling: f64, bins: usize) -> Vec<HistogramBin>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let salaries: Vec<f64> = records
        .into_iter()
        .filter_map(|r| r.annual_usd_salary_above(floor))
        .filter(|&s| s < ceiling)
        .collect();
    if salaries.is_empty() || bins == 0 {
        return Vec::new();
    }

    let lo = salaries.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = salaries.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (hi - lo).abs() < f64::EPSILON {
        return vec![HistogramBin {
            lo,
            hi,
            count: salaries.len(),
        }];
    }

    let width = (hi - lo) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lo: lo + width * i as f64,
            hi: lo + width * (i + 1) as f64,
            count: 0,
        })
        .collect();
    for s in salaries {
        let idx = (((s - lo) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

// ---------------------------------------------------------------------------
// Boolean policy split
// ---------------------------------------------------------------------------

/// Two-slice split of a boolean field: `(yes_label, no_label)`.
pub fn policy_split<'a, I, F>(records: I, flag: F, labels: (&str, &str)) -> Vec<AggregateEntry>
where
    I: IntoIterator<Item = &'a JobRecord>,
    F: Fn(&JobRecord) -> bool,
{
    let (yes, no) = records
        .into_iter()
        .fold((0, 0), |(y, n), r| if flag(r) { (y + 1, n) } else { (y, n + 1) });
    vec![
        AggregateEntry {
            name: labels.0.to_string(),
            count: yes,
        },
        AggregateEntry {
            name: labels.1.to_string(),
            count: no,
        },
    ]
}

// ---------------------------------------------------------------------------
// Skill bubbles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCategory {
    Programming,
    BiViz,
    Cloud,
    MlAi,
    Other,
}

impl SkillCategory {
    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::Programming => "Programming",
            SkillCategory::BiViz => "BI & visualisation",
            SkillCategory::Cloud => "Cloud & platforms",
            SkillCategory::MlAi => "ML & AI",
            SkillCategory::Other => "Other",
        }
    }
}

/// Keyword heuristic, first matching group wins.
pub fn categorize_skill(skill: &str) -> SkillCategory {
    let s = skill.to_lowercase();
    let has = |words: &[&str]| contains_any(&s, words);

    if s.split_whitespace().any(|word| word == "r")
        || has(&["python", "java", "c++", "c#", "scala", "typescript", "javascript"])
    {
        SkillCategory::Programming
    } else if has(&["power bi", "tableau", "looker", "qlik", "excel"]) {
        SkillCategory::BiViz
    } else if has(&["aws", "azure", "gcp", "snowflake", "databricks", "bigquery"]) {
        SkillCategory::Cloud
    } else if has(&[
        "machine learning",
        "ml",
        "deep learning",
        "pytorch",
        "tensorflow",
        "llm",
        "nlp",
    ]) {
        SkillCategory::MlAi
    } else {
        SkillCategory::Other
    }
}

fn contains_any(haystack: &str, words: &[&str]) -> bool {
    words.iter().any(|w| haystack.contains(w))
}

/// Labels longer than ten characters keep nine and an ellipsis.
pub fn shorten_label(skill: &str) -> String {
    if skill.chars().count() <= 10 {
        return skill.to_string();
    }
    let mut short: String = skill.chars().take(9).collect();
    short.push('…');
    short
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillBubble {
    pub skill: String,
    pub short_label: String,
    pub count: usize,
    pub category: SkillCategory,
}

pub fn skill_bubbles<'a, I>(records: I, max: usize) -> Vec<SkillBubble>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    top_n(aggregate(records, Field::TechnicalSkills), max)
        .into_iter()
        .filter(|e| e.count > 0)
        .map(|e| SkillBubble {
            short_label: shorten_label(&e.name),
            category: categorize_skill(&e.name),
            skill: e.name,
            count: e.count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn paid(salary: f64, seniority: &str, skills: &[&str]) -> JobRecord {
        JobRecord {
            salary_value: Some(salary),
            salary_currency: "USD".into(),
            salary_type: "annual".into(),
            seniority_level: seniority.into(),
            technical_skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn dated(y: i32, m: u32, d: u32, skills: &[&str]) -> JobRecord {
        JobRecord {
            date: NaiveDate::from_ymd_opt(y, m, d),
            technical_skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    const NOV: YearMonth = YearMonth { year: 2025, month: 11 };
    const OCT: YearMonth = YearMonth { year: 2025, month: 10 };

    #[test]
    fn median_even_and_odd() {
        assert_eq!(median(&mut []), None);
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn monthly_volume_sorts_and_skips_undated() {
        let records = vec![
            dated(2025, 11, 3, &[]),
            dated(2025, 10, 30, &[]),
            JobRecord::default(),
            dated(2025, 11, 20, &[]),
        ];
        assert_eq!(
            monthly_volume(&records),
            vec![
                MonthlyCount { month: OCT, count: 1 },
                MonthlyCount { month: NOV, count: 2 },
            ]
        );
    }

    #[test]
    fn volume_axis_spans_full_dataset() {
        let ds = JobDataset::from_records(vec![dated(2025, 10, 1, &[]), dated(2025, 11, 1, &[])]);
        let only_nov: Vec<&JobRecord> = ds.records().iter().skip(1).collect();
        let series = volume_series(&ds, only_nov);
        assert_eq!(series.axis, Some((OCT, NOV)));
        assert_eq!(series.baseline.len(), 2);
        assert_eq!(series.filtered, vec![MonthlyCount { month: NOV, count: 1 }]);
    }

    #[test]
    fn skill_trends_count_postings_not_mentions() {
        let records = vec![
            dated(2025, 11, 1, &["SQL", "sql", "Python"]),
            dated(2025, 11, 2, &["SQL"]),
        ];
        let series = skill_trends(&records, None, 5);
        assert_eq!(series[0].skill, "SQL");
        assert_eq!(series[0].points, vec![MonthlyCount { month: NOV, count: 2 }]);
        assert_eq!(series[1].skill, "Python");
    }

    #[test]
    fn skill_trends_top_breaks_ties_by_first_seen() {
        let records = vec![
            dated(2025, 11, 1, &["A", "B", "C"]),
            dated(2025, 11, 2, &["C", "B"]),
        ];
        let names: Vec<String> = skill_trends(&records, None, 2)
            .into_iter()
            .map(|s| s.skill)
            .collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn skill_trends_focus_narrows_or_empties() {
        let records = vec![dated(2025, 11, 1, &["SQL", "Python"]), dated(2025, 10, 1, &["Python"])];
        let focused = skill_trends(&records, Some("python"), 5);
        assert_eq!(focused.len(), 1);
        assert_eq!(focused[0].total, 2);
        assert!(skill_trends(&records, Some("Rust"), 5).is_empty());
    }

    #[test]
    fn skill_value_map_means_and_classifies() {
        let salaries = [30_000.0, 90_000.0, 60_000.0, 50_000.0, 70_000.0];
        let mut records: Vec<JobRecord> =
            salaries.iter().map(|&s| paid(s, "Mid", &["SQL"])).collect();
        records.push(paid(15_000.0, "Mid", &["SQL"]));
        records.push(JobRecord {
            salary_currency: "EUR".into(),
            ..paid(200_000.0, "Mid", &["SQL"])
        });

        let map = skill_value_map(&records, 20_000.0, 5);
        assert_eq!(map.points.len(), 1);
        let sql = &map.points[0];
        assert_eq!(sql.mentions, 5);
        assert!((sql.avg_salary - 60_000.0).abs() < 1e-9);
        // alone, the skill sits on both medians
        assert_eq!(sql.quadrant, Quadrant::Niche);
    }

    #[test]
    fn skill_value_map_drops_thin_skills() {
        let records: Vec<JobRecord> = (0..4).map(|_| paid(80_000.0, "Mid", &["Rust"])).collect();
        let map = skill_value_map(&records, 20_000.0, 5);
        assert!(map.points.is_empty());
        assert_eq!(map.median_mentions, None);
    }

    #[test]
    fn quadrant_boundaries_count_as_below() {
        assert_eq!(Quadrant::classify(10.0, 80.0, 5.0, 50.0), Quadrant::Elite);
        assert_eq!(Quadrant::classify(10.0, 50.0, 5.0, 50.0), Quadrant::Commodity);
        assert_eq!(Quadrant::classify(5.0, 80.0, 5.0, 50.0), Quadrant::HiddenGem);
        assert_eq!(Quadrant::classify(5.0, 50.0, 5.0, 50.0), Quadrant::Niche);
    }

    #[test]
    fn seniority_ladder_orders_levels_and_computes_multiplier() {
        let mut records = Vec::new();
        records.extend((0..5).map(|_| paid(100_000.0, "Senior", &[])));
        records.extend((0..5).map(|_| paid(50_000.0, "Junior", &[])));
        records.extend((0..4).map(|_| paid(300_000.0, "Executive", &[])));
        records.extend((0..6).map(|_| paid(80_000.0, "Wizard", &[])));

        let ladder = seniority_ladder(&records, 10_000.0, 5);
        let levels: Vec<&str> = ladder.rungs.iter().map(|r| r.level.as_str()).collect();
        assert_eq!(levels, vec!["junior", "senior"]);
        assert_eq!(ladder.multiplier, Some(2.0));
        assert_eq!(ladder.multiplier_label(), "x2.0");
    }

    #[test]
    fn seniority_multiplier_prefers_entry_and_senior() {
        let mut records = Vec::new();
        records.extend((0..5).map(|_| paid(40_000.0, "entry", &[])));
        records.extend((0..5).map(|_| paid(60_000.0, "Junior", &[])));
        records.extend((0..5).map(|_| paid(130_000.0, "Lead", &[])));
        let ladder = seniority_ladder(&records, 10_000.0, 5);
        assert_eq!(ladder.multiplier, Some(3.3));
    }

    #[test]
    fn seniority_multiplier_unavailable_without_both_sides() {
        let records: Vec<JobRecord> = (0..5).map(|_| paid(100_000.0, "Senior", &[])).collect();
        let ladder = seniority_ladder(&records, 10_000.0, 5);
        assert_eq!(ladder.rungs.len(), 1);
        assert_eq!(ladder.multiplier_label(), "N/A");
    }

    #[test]
    fn kpis_over_mixed_records() {
        let records = vec![
            JobRecord {
                company: "Acme".into(),
                country: "France".into(),
                ..paid(80_000.0, "Mid", &["SQL", "Python"])
            },
            JobRecord {
                company: "Acme".into(),
                country: "Not specified".into(),
                ..paid(500.0, "Mid", &["SQL"])
            },
        ];
        let k = kpis(&records, 1_000.0);
        assert_eq!(k.total_postings, 2);
        assert_eq!(k.distinct_companies, 1);
        assert_eq!(k.distinct_countries, 1);
        assert_eq!(k.median_salary_label(), "$80k");
        assert_eq!(k.top_skill.as_deref(), Some("SQL"));
    }

    #[test]
    fn histogram_bins_cover_range() {
        let records: Vec<JobRecord> = [30_000.0, 40_000.0, 50_000.0, 600_000.0]
            .iter()
            .map(|&s| paid(s, "Mid", &[]))
            .collect();
        let bins = salary_histogram(&records, 20_000.0, 500_000.0, 2);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].count + bins[1].count, 3);
        assert_eq!(bins[1].count, 2);
        assert_eq!(bins[1].hi, 50_000.0);
    }

    #[test]
    fn policy_split_keeps_zero_slices() {
        let records = vec![JobRecord::default(), JobRecord::default()];
        let split = policy_split(&records, |r| r.hybrid_policy, ("Hybrid/Remote", "On-site"));
        assert_eq!(split[0].count, 0);
        assert_eq!(split[1].count, 2);
    }

    #[test]
    fn skill_categories_and_labels() {
        assert_eq!(categorize_skill("Python"), SkillCategory::Programming);
        assert_eq!(categorize_skill("R"), SkillCategory::Programming);
        assert_eq!(categorize_skill("R Shiny"), SkillCategory::Programming);
        assert_eq!(categorize_skill("Power BI"), SkillCategory::BiViz);
        assert_eq!(categorize_skill("Snowflake"), SkillCategory::Cloud);
        assert_eq!(categorize_skill("PyTorch"), SkillCategory::MlAi);
        assert_eq!(categorize_skill("Communication"), SkillCategory::Other);
        assert_eq!(shorten_label("SQL"), "SQL");
        assert_eq!(shorten_label("Machine Learning"), "Machine L…");
    }
}
