use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use jobscope::config::DashboardConfig;
use jobscope::data::aggregate::{aggregate, Field};
use jobscope::data::filter::{apply_filters, FilterState};
use jobscope::data::loader::load_file;
use jobscope::data::metrics::{monthly_volume, seniority_ladder, skill_value_map, MonthlyCount};
use jobscope::data::model::{YearMonth, NOT_SPECIFIED};
use jobscope::data::normalize::SourceKind;
use jobscope::state::{AppState, FilterGroup};

fn write_temp(suffix: &str, body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}

fn stats_csv(rows: &[&str]) -> tempfile::NamedTempFile {
    let mut body = String::from(
        "job_title|country|seniority_level|salary_value|salary_currency|salary_type|technical_skills|date_posted\n",
    );
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    write_temp(".csv", &body)
}

const JOBS_JSON: &str = r#"[
  {"id": 1, "title": "Data Analyst", "description": "SQL reporting", "country": "France",
   "seniority": "Junior", "salary": "52000", "salary_currency": "USD", "salary_type": "annual",
   "hybrid": "True", "visa": "no", "technical_skills": "['Python', 'SQL']",
   "domains": "['Finance']", "date_posted": "2025-11-03"},
  {"id": 2, "title": "ML Engineer", "description": "Deploy models", "country": "Canada",
   "seniority": "Senior", "salary": "", "hybrid": false, "visa": "oui",
   "technical_skills": "Python; PyTorch", "domains": "Health|Research", "date_posted": "2025-10-21"},
  {"title": "Data Engineer", "description": "Pipelines in Spark", "country": "",
   "technical_skills": ["Python", "Spark", "SQL"], "domains": "[]", "date_posted": "soon"},
  "garbage"
]"#;

#[test]
fn jobs_feed_loads_and_normalizes_every_object() {
    let file = write_temp(".json", JOBS_JSON);
    let ds = load_file(file.path(), SourceKind::JobsFeed, None).unwrap();
    assert_eq!(ds.len(), 3);

    let first = &ds.records()[0];
    assert!(first.hybrid_policy);
    assert!(!first.visa_sponsorship);
    assert_eq!(first.technical_skills, vec!["Python", "SQL"]);

    let second = &ds.records()[1];
    assert_eq!(second.salary_value, None);
    assert!(second.visa_sponsorship);
    assert_eq!(second.domains, vec!["Health", "Research"]);

    let third = &ds.records()[2];
    assert_eq!(third.id, Some(3));
    assert_eq!(third.country, NOT_SPECIFIED);
    assert_eq!(third.company, "Confidential");
    assert!(third.domains.is_empty());
    assert_eq!(third.date, None);
}

#[test]
fn skills_are_all_of_and_domains_any_of() {
    let file = write_temp(".json", JOBS_JSON);
    let ds = load_file(file.path(), SourceKind::JobsFeed, None).unwrap();
    let set = |items: &[&str]| -> BTreeSet<String> { items.iter().map(|s| s.to_string()).collect() };

    let both = FilterState {
        skills: set(&["Python", "SQL"]),
        ..Default::default()
    };
    let titles: Vec<&str> = apply_filters(ds.records(), &both)
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Data Analyst", "Data Engineer"]);

    let java = FilterState {
        skills: set(&["Python", "Java"]),
        ..Default::default()
    };
    assert!(apply_filters(ds.records(), &java).is_empty());

    let domains = FilterState {
        domains: set(&["Finance", "Health"]),
        ..Default::default()
    };
    assert_eq!(apply_filters(ds.records(), &domains).len(), 2);
}

#[test]
fn skill_value_map_over_stats_feed() {
    let file = stats_csv(&[
        "Analyst|France|Mid|30000|USD|annual|SQL|2025-01-01",
        "Analyst|France|Mid|90000|USD|annual|SQL|2025-01-01",
        "Analyst|France|Mid|60000|USD|annual|SQL;Excel|2025-01-01",
        "Analyst|France|Mid|45000|usd|Annual|SQL|2025-01-01",
        "Analyst|France|Mid|75000|USD|annual|SQL|2025-01-01",
        "Analyst|France|Mid|75000|EUR|annual|SQL|2025-01-01",
        "Analyst|France|Mid||USD|annual|SQL|2025-01-01",
    ]);
    let ds = load_file(file.path(), SourceKind::StatsFeed, None).unwrap();
    let map = skill_value_map(ds.records(), 20_000.0, 5);

    assert_eq!(map.points.len(), 1);
    let sql = &map.points[0];
    assert_eq!(sql.skill, "SQL");
    assert_eq!(sql.mentions, 5);
    assert!((sql.avg_salary - 60_000.0).abs() < 1e-9);
}

#[test]
fn seniority_multiplier_from_stats_feed() {
    let mut rows = Vec::new();
    for _ in 0..5 {
        rows.push("Analyst|France|Junior|50000|USD|annual|SQL|2025-01-01");
        rows.push("Analyst|France|Senior|100000|USD|annual|SQL|2025-01-01");
    }
    let file = stats_csv(&rows);
    let ds = load_file(file.path(), SourceKind::StatsFeed, None).unwrap();
    let ladder = seniority_ladder(ds.records(), 10_000.0, 5);
    assert_eq!(ladder.multiplier_label(), "x2.0");
}

#[test]
fn undated_records_leave_volume_but_stay_in_breakdowns() {
    let file = stats_csv(&[
        "Analyst|France|Mid|||||2025-11-03",
        "Analyst|Spain|Mid|||||2025-11-28",
        "Analyst|France|Mid|||||whenever",
    ]);
    let ds = load_file(file.path(), SourceKind::StatsFeed, None).unwrap();

    assert_eq!(
        monthly_volume(ds.records()),
        vec![MonthlyCount {
            month: YearMonth { year: 2025, month: 11 },
            count: 2,
        }]
    );
    let countries = aggregate(ds.records(), Field::Country);
    let total: usize = countries.iter().map(|e| e.count).sum();
    assert_eq!(total, 3);
    assert_eq!(countries[0].name, "France");
    assert_eq!(countries[0].count, 2);
}

#[test]
fn app_state_recomputes_every_chart_on_filter_change() {
    let file = write_temp(".json", JOBS_JSON);
    let mut state = AppState::new(DashboardConfig::default());
    state.load_path(file.path(), SourceKind::JobsFeed).unwrap();
    assert_eq!(state.view().kpis.total_postings, 3);
    assert_eq!(state.view().kpis.top_skill.as_deref(), Some("Python"));

    state.toggle_filter_value(FilterGroup::Country, "Canada");
    assert_eq!(state.view().kpis.total_postings, 1);
    assert_eq!(state.view().explorer.total, 1);
    let baseline: usize = state.view().volume.baseline.iter().map(|m| m.count).sum();
    assert_eq!(baseline, 2);

    state.set_text("nothing matches this");
    assert_eq!(state.view().explorer.total, 0);
    assert!(state.view().tech_skills.is_empty());
    assert!(state.view().skill_trends.is_empty());

    state.reset_filters();
    assert_eq!(state.view().explorer.total, 3);
}

#[test]
fn failed_load_keeps_previous_dataset() {
    let file = write_temp(".json", JOBS_JSON);
    let mut state = AppState::new(DashboardConfig::default());
    state.load_path(file.path(), SourceKind::JobsFeed).unwrap();

    let missing = Path::new("/definitely/not/here.json");
    assert!(state.load_path(missing, SourceKind::JobsFeed).is_err());
    assert!(state.status_message.is_some());
    assert_eq!(state.dataset().map(|d| d.len()), Some(3));
}

#[test]
fn detail_view_opens_the_clicked_row_when_ids_collide() {
    let file = write_temp(".json", r#"[{"id": 2, "title": "First"}, {"title": "Second"}]"#);
    let mut state = AppState::new(DashboardConfig::default());
    state.load_path(file.path(), SourceKind::JobsFeed).unwrap();

    let ids: Vec<Option<i64>> = state.dataset().unwrap().records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![Some(2), Some(2)]);

    let (index, _) = state.explorer_records()[1];
    state.select_job(index);
    assert_eq!(state.selected_job().map(|j| j.title.as_str()), Some("Second"));
}

#[test]
fn detail_view_opens_stats_feed_rows() {
    let file = write_temp(".csv", "job_title|country\nAnalyst|France\nEngineer|Spain\n");
    let mut state = AppState::new(DashboardConfig::default());
    state.load_path(file.path(), SourceKind::StatsFeed).unwrap();

    let (index, rec) = state.explorer_records()[1];
    assert_eq!(rec.id, None);
    state.select_job(index);
    let job = state.selected_job().unwrap();
    assert_eq!((job.title.as_str(), job.country.as_str()), ("Engineer", "Spain"));

    state.close_job();
    assert!(state.selected_job().is_none());
}
