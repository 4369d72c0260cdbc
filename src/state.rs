use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDate;

use crate::config::DashboardConfig;
use crate::data::aggregate::{aggregate, fold_other, top_n, unique_values, AggregateEntry, Field};
use crate::data::filter::{filtered_indices, FilterState, Period};
use crate::data::loader::load_file;
use crate::data::metrics::{
    kpis, policy_split, salary_histogram, seniority_ladder, skill_bubbles, skill_trends,
    skill_value_map, volume_series, HistogramBin, Kpis, SeniorityLadder, SkillBubble, SkillSeries,
    SkillValueMap, VolumeSeries,
};
use crate::data::model::{JobDataset, JobRecord};
use crate::data::normalize::SourceKind;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Derived view: everything the charts read
// ---------------------------------------------------------------------------

/// One filtered page of the explorer list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExplorerPage {
    /// Number of postings passing the filters.
    pub total: usize,
    /// Dataset indices of the postings shown.
    pub shown: Vec<usize>,
}

/// Every per-chart dataset for the current filter state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardView {
    pub kpis: Kpis,
    pub tech_skills: Vec<AggregateEntry>,
    pub tools: Vec<AggregateEntry>,
    pub countries: Vec<AggregateEntry>,
    pub domains: Vec<AggregateEntry>,
    pub top_titles: Vec<AggregateEntry>,
    pub top_companies: Vec<AggregateEntry>,
    pub seniority_pie: Vec<AggregateEntry>,
    pub source_pie: Vec<AggregateEntry>,
    pub hybrid_pie: Vec<AggregateEntry>,
    pub visa_pie: Vec<AggregateEntry>,
    pub salary_histogram: Vec<HistogramBin>,
    pub volume: VolumeSeries,
    pub skill_trends: Vec<SkillSeries>,
    pub skill_bubbles: Vec<SkillBubble>,
    pub skill_value: SkillValueMap,
    pub ladder: SeniorityLadder,
    pub explorer: ExplorerPage,
}

/// Recompute every dataset from scratch over `indices`.
pub fn build_view(
    dataset: &JobDataset,
    indices: &[usize],
    focus_skill: Option<&str>,
    config: &DashboardConfig,
) -> DashboardView {
    let charts = &config.charts;
    let limits = &config.thresholds;
    let rows = dataset.select(indices);

    DashboardView {
        kpis: kpis(rows.clone(), limits.kpi_salary_floor),
        tech_skills: top_n(aggregate(rows.clone(), Field::TechnicalSkills), charts.bar_top_n),
        tools: top_n(aggregate(rows.clone(), Field::Tools), charts.bar_top_n),
        countries: top_n(aggregate(rows.clone(), Field::Country), charts.bar_top_n),
        domains: top_n(aggregate(rows.clone(), Field::Domains), charts.bar_top_n),
        top_titles: top_n(aggregate(rows.clone(), Field::Title), charts.title_top_n),
        top_companies: top_n(aggregate(rows.clone(), Field::Company), charts.title_top_n),
        seniority_pie: fold_other(aggregate(rows.clone(), Field::Seniority), charts.pie_cutoff),
        source_pie: fold_other(aggregate(rows.clone(), Field::Source), 1),
        hybrid_pie: policy_split(rows.clone(), |r| r.hybrid_policy, ("Hybrid/Remote", "On-site")),
        visa_pie: policy_split(rows.clone(), |r| r.visa_sponsorship, ("Visa OK", "Visa No")),
        salary_histogram: salary_histogram(
            rows.clone(),
            limits.histogram_salary_floor,
            limits.histogram_salary_ceiling,
            charts.histogram_bins,
        ),
        volume: volume_series(dataset, rows.clone()),
        skill_trends: skill_trends(rows.clone(), focus_skill, charts.trend_series),
        skill_bubbles: skill_bubbles(rows.clone(), charts.max_bubbles),
        skill_value: skill_value_map(rows.clone(), limits.value_map_salary_floor, limits.min_samples),
        ladder: seniority_ladder(rows, limits.ladder_salary_floor, limits.min_samples),
        explorer: ExplorerPage {
            total: indices.len(),
            shown: indices.iter().copied().take(charts.explorer_page).collect(),
        },
    }
}

// ---------------------------------------------------------------------------
// Multi-select options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterGroup {
    Country,
    Skill,
    Seniority,
    Domain,
}

impl FilterGroup {
    pub const ALL: [FilterGroup; 4] = [
        FilterGroup::Country,
        FilterGroup::Skill,
        FilterGroup::Seniority,
        FilterGroup::Domain,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterGroup::Country => "Country",
            FilterGroup::Skill => "Skills (all of)",
            FilterGroup::Seniority => "Seniority",
            FilterGroup::Domain => "Domain (any of)",
        }
    }

    fn field(self) -> Field {
        match self {
            FilterGroup::Country => Field::Country,
            FilterGroup::Skill => Field::TechnicalSkills,
            FilterGroup::Seniority => Field::Seniority,
            FilterGroup::Domain => Field::Domains,
        }
    }

    pub fn selection(self, filters: &FilterState) -> &BTreeSet<String> {
        match self {
            FilterGroup::Country => &filters.countries,
            FilterGroup::Skill => &filters.skills,
            FilterGroup::Seniority => &filters.seniorities,
            FilterGroup::Domain => &filters.domains,
        }
    }

    fn selection_mut(self, filters: &mut FilterState) -> &mut BTreeSet<String> {
        match self {
            FilterGroup::Country => &mut filters.countries,
            FilterGroup::Skill => &mut filters.skills,
            FilterGroup::Seniority => &mut filters.seniorities,
            FilterGroup::Domain => &mut filters.domains,
        }
    }
}

/// Sorted distinct values over the full dataset, one list per group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub skills: Vec<String>,
    pub seniorities: Vec<String>,
    pub domains: Vec<String>,
}

impl FilterOptions {
    pub fn from_dataset(dataset: &JobDataset) -> Self {
        let all = dataset.records();
        FilterOptions {
            countries: unique_values(all, FilterGroup::Country.field()),
            skills: unique_values(all, FilterGroup::Skill.field()),
            seniorities: unique_values(all, FilterGroup::Seniority.field()),
            domains: unique_values(all, FilterGroup::Domain.field()),
        }
    }

    pub fn values(&self, group: FilterGroup) -> &[String] {
        match group {
            FilterGroup::Country => &self.countries,
            FilterGroup::Skill => &self.skills,
            FilterGroup::Seniority => &self.seniorities,
            FilterGroup::Domain => &self.domains,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
///
/// Every mutator that touches the filters or the focus skill ends in
/// [`AppState::on_filter_state_changed`], which rebuilds `view` in full.
#[derive(Debug, Default)]
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a source is loaded).
    dataset: Option<JobDataset>,
    source_kind: Option<SourceKind>,

    filters: FilterState,
    focus_skill: Option<String>,

    /// Indices of postings passing the current filters.
    visible_indices: Vec<usize>,
    options: FilterOptions,
    view: DashboardView,

    /// Dataset index of the posting open in the detail window.
    selected_job: Option<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn dataset(&self) -> Option<&JobDataset> {
        self.dataset.as_ref()
    }

    pub fn source_kind(&self) -> Option<SourceKind> {
        self.source_kind
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn focus_skill(&self) -> Option<&str> {
        self.focus_skill.as_deref()
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible_indices
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Load a file and replace the dataset. On failure the previous dataset
    /// stays and the error is kept as the status message.
    pub fn load_path(&mut self, path: &Path, kind: SourceKind) -> Result<(), LoadError> {
        match load_file(path, kind, self.config.sources.delimiter_byte()) {
            Ok(dataset) => {
                self.set_dataset(dataset, kind);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error loading {}: {e}", path.display()));
                Err(e)
            }
        }
    }

    /// Ingest a newly loaded dataset: fresh options, empty filters, no focus.
    pub fn set_dataset(&mut self, dataset: JobDataset, kind: SourceKind) {
        self.options = FilterOptions::from_dataset(&dataset);
        self.filters = FilterState::default();
        self.focus_skill = None;
        self.selected_job = None;
        self.dataset = Some(dataset);
        self.source_kind = Some(kind);
        self.status_message = None;
        self.on_filter_state_changed();
    }

    /// Single recompute entry point: refilter and rebuild every dataset.
    pub fn on_filter_state_changed(&mut self) {
        let Some(ds) = &self.dataset else {
            self.visible_indices.clear();
            self.view = DashboardView::default();
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.filters);
        self.view = build_view(
            ds,
            &self.visible_indices,
            self.focus_skill.as_deref(),
            &self.config,
        );
        log::debug!(
            "Recomputed view: {}/{} postings, focus {:?}",
            self.visible_indices.len(),
            ds.len(),
            self.focus_skill
        );
    }

    /// Replace the whole filter state.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.on_filter_state_changed();
    }

    pub fn set_text(&mut self, text: &str) {
        self.filters.text = text.to_string();
        self.on_filter_state_changed();
    }

    pub fn set_min_salary(&mut self, floor: f64) {
        self.filters.min_salary = floor.max(0.0);
        self.on_filter_state_changed();
    }

    pub fn set_hybrid_only(&mut self, on: bool) {
        self.filters.hybrid_only = on;
        self.on_filter_state_changed();
    }

    pub fn set_visa_only(&mut self, on: bool) {
        self.filters.visa_only = on;
        self.on_filter_state_changed();
    }

    /// `None` means all time; otherwise the last `days` up to `today`.
    pub fn set_period(&mut self, days: Option<u32>, today: NaiveDate) {
        self.filters.period = match days {
            None => Period::AllTime,
            Some(days) => Period::LastDays { days, anchor: today },
        };
        self.on_filter_state_changed();
    }

    /// Toggle a single value in a multi-select group.
    pub fn toggle_filter_value(&mut self, group: FilterGroup, value: &str) {
        let selected = group.selection_mut(&mut self.filters);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.on_filter_state_changed();
    }

    /// Deselect every value in a group.
    pub fn clear_group(&mut self, group: FilterGroup) {
        group.selection_mut(&mut self.filters).clear();
        self.on_filter_state_changed();
    }

    pub fn reset_filters(&mut self) {
        self.set_filters(FilterState::default());
    }

    /// Pin a skill for the trend chart; pinning the same skill again unpins it.
    pub fn toggle_focus_skill(&mut self, skill: &str) {
        let same = self
            .focus_skill
            .as_deref()
            .is_some_and(|cur| cur.to_lowercase() == skill.to_lowercase());
        self.focus_skill = if same { None } else { Some(skill.to_string()) };
        self.on_filter_state_changed();
    }

    /// Open the posting at `index` in the dataset. Ids are not unique (and
    /// absent on the stats feed), so the detail view keys on position.
    pub fn select_job(&mut self, index: usize) {
        self.selected_job = Some(index);
    }

    pub fn close_job(&mut self) {
        self.selected_job = None;
    }

    /// The posting open in the detail window, if it still exists.
    pub fn selected_job(&self) -> Option<&JobRecord> {
        let index = self.selected_job?;
        self.dataset.as_ref()?.get(index)
    }

    /// Records on the current explorer page, with their dataset indices.
    pub fn explorer_records(&self) -> Vec<(usize, &JobRecord)> {
        let Some(ds) = &self.dataset else {
            return Vec::new();
        };
        self.view
            .explorer
            .shown
            .iter()
            .filter_map(|&i| ds.get(i).map(|rec| (i, rec)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn posting(id: i64, skills: &[&str], hybrid: bool) -> JobRecord {
        JobRecord {
            id: Some(id),
            title: format!("Job {id}"),
            country: if id % 2 == 0 { "France" } else { "Canada" }.into(),
            seniority_level: "Mid".into(),
            hybrid_policy: hybrid,
            technical_skills: skills.iter().map(|s| s.to_string()).collect(),
            date: NaiveDate::from_ymd_opt(2025, 11, id as u32 % 28 + 1),
            ..Default::default()
        }
    }

    fn loaded() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(
            JobDataset::from_records(vec![
                posting(1, &["SQL", "Python"], true),
                posting(2, &["SQL"], false),
                posting(3, &["Rust"], true),
            ]),
            SourceKind::JobsFeed,
        );
        state
    }

    #[test]
    fn loading_shows_everything() {
        let state = loaded();
        assert_eq!(state.visible_indices(), &[0, 1, 2]);
        assert_eq!(state.view().explorer.total, 3);
        assert_eq!(state.options().countries, vec!["Canada", "France"]);
        assert_eq!(state.view().tech_skills[0].name, "SQL");
    }

    #[test]
    fn every_mutation_recomputes_the_view() {
        let mut state = loaded();
        state.set_hybrid_only(true);
        assert_eq!(state.view().explorer.total, 2);
        state.toggle_filter_value(FilterGroup::Skill, "SQL");
        assert_eq!(state.visible_indices(), &[0]);
        state.toggle_filter_value(FilterGroup::Skill, "SQL");
        assert_eq!(state.visible_indices(), &[0, 2]);
        state.reset_filters();
        assert!(state.filters().is_empty());
        assert_eq!(state.view().explorer.total, 3);
    }

    #[test]
    fn focus_skill_toggles_off_on_second_click() {
        let mut state = loaded();
        state.toggle_focus_skill("Rust");
        assert_eq!(state.focus_skill(), Some("Rust"));
        assert_eq!(state.view().skill_trends.len(), 1);
        state.toggle_focus_skill("rust");
        assert_eq!(state.focus_skill(), None);
        assert_eq!(state.view().skill_trends.len(), 3);
    }

    #[test]
    fn volume_baseline_ignores_filters() {
        let mut state = loaded();
        state.toggle_filter_value(FilterGroup::Country, "France");
        let volume = &state.view().volume;
        let baseline: usize = volume.baseline.iter().map(|m| m.count).sum();
        let filtered: usize = volume.filtered.iter().map(|m| m.count).sum();
        assert_eq!((baseline, filtered), (3, 1));
    }

    #[test]
    fn selected_job_resolves_by_index() {
        let mut state = loaded();
        state.select_job(2);
        assert_eq!(state.selected_job().map(|j| j.title.as_str()), Some("Job 3"));
        state.close_job();
        assert!(state.selected_job().is_none());
    }

    #[test]
    fn explorer_click_opens_the_clicked_posting_despite_shared_ids() {
        let mut state = AppState::new(DashboardConfig::default());
        let mut second = posting(2, &[], false);
        second.title = "Second".into();
        state.set_dataset(
            JobDataset::from_records(vec![posting(2, &[], false), second]),
            SourceKind::JobsFeed,
        );

        let (index, rec) = state.explorer_records()[1];
        assert_eq!(rec.title, "Second");
        state.select_job(index);
        assert_eq!(state.selected_job().map(|j| j.title.as_str()), Some("Second"));
    }

    #[test]
    fn explorer_click_opens_postings_without_id() {
        let mut state = AppState::new(DashboardConfig::default());
        let anonymous = JobRecord {
            title: "Analyst".into(),
            ..Default::default()
        };
        state.set_dataset(JobDataset::from_records(vec![anonymous]), SourceKind::StatsFeed);

        let (index, rec) = state.explorer_records()[0];
        assert_eq!(rec.id, None);
        state.select_job(index);
        assert_eq!(state.selected_job().map(|j| j.title.as_str()), Some("Analyst"));
    }

    #[test]
    fn focus_skill_toggle_ignores_non_ascii_case() {
        let mut state = loaded();
        state.toggle_focus_skill("Élasticité");
        state.toggle_focus_skill("élasticité");
        assert_eq!(state.focus_skill(), None);
    }

    #[test]
    fn reload_resets_filters_and_focus() {
        let mut state = loaded();
        state.set_text("job");
        state.toggle_focus_skill("SQL");
        state.set_dataset(JobDataset::from_records(vec![posting(9, &[], false)]), SourceKind::StatsFeed);
        assert!(state.filters().is_empty());
        assert_eq!(state.focus_skill(), None);
        assert_eq!(state.view().explorer.total, 1);
    }
}
