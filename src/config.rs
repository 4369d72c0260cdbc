use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

pub const CONFIG_ENV: &str = "JOBSCOPE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "jobscope.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    /// Jobs feed loaded at start-up, if set and present.
    #[serde(default)]
    pub jobs: Option<PathBuf>,
    /// Stats feed loaded at start-up when no jobs feed is configured.
    #[serde(default)]
    pub stats: Option<PathBuf>,
    /// One of `","`, `";"`, `"|"`; empty means sniff from the header.
    #[serde(default)]
    pub delimiter: String,
}

impl SourcesConfig {
    pub fn delimiter_byte(&self) -> Option<u8> {
        match self.delimiter.as_str() {
            "," => Some(b','),
            ";" => Some(b';'),
            "|" => Some(b'|'),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    #[serde(default = "default_bar_top_n")]
    pub bar_top_n: usize,
    #[serde(default = "default_pie_cutoff")]
    pub pie_cutoff: usize,
    #[serde(default = "default_title_top_n")]
    pub title_top_n: usize,
    #[serde(default = "default_trend_series")]
    pub trend_series: usize,
    #[serde(default = "default_max_bubbles")]
    pub max_bubbles: usize,
    #[serde(default = "default_explorer_page")]
    pub explorer_page: usize,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    /// Fewest qualifying postings for a skill or seniority bucket.
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,
    #[serde(default = "default_value_map_salary_floor")]
    pub value_map_salary_floor: f64,
    #[serde(default = "default_ladder_salary_floor")]
    pub ladder_salary_floor: f64,
    #[serde(default = "default_kpi_salary_floor")]
    pub kpi_salary_floor: f64,
    #[serde(default = "default_histogram_salary_floor")]
    pub histogram_salary_floor: f64,
    #[serde(default = "default_histogram_salary_ceiling")]
    pub histogram_salary_ceiling: f64,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub charts: ChartConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

impl DashboardConfig {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// `$JOBSCOPE_CONFIG`, else `./jobscope.toml`, else defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if !path.exists() {
            log::debug!("No config at {}; using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::load(&path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

fn default_bar_top_n() -> usize {
    15
}

fn default_pie_cutoff() -> usize {
    5
}

fn default_title_top_n() -> usize {
    10
}

fn default_trend_series() -> usize {
    5
}

fn default_max_bubbles() -> usize {
    60
}

fn default_explorer_page() -> usize {
    10
}

fn default_histogram_bins() -> usize {
    20
}

fn default_min_samples() -> usize {
    5
}

fn default_value_map_salary_floor() -> f64 {
    20_000.0
}

fn default_ladder_salary_floor() -> f64 {
    10_000.0
}

fn default_kpi_salary_floor() -> f64 {
    1_000.0
}

fn default_histogram_salary_floor() -> f64 {
    20_000.0
}

fn default_histogram_salary_ceiling() -> f64 {
    500_000.0
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            bar_top_n: default_bar_top_n(),
            pie_cutoff: default_pie_cutoff(),
            title_top_n: default_title_top_n(),
            trend_series: default_trend_series(),
            max_bubbles: default_max_bubbles(),
            explorer_page: default_explorer_page(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            min_samples: default_min_samples(),
            value_map_salary_floor: default_value_map_salary_floor(),
            ladder_salary_floor: default_ladder_salary_floor(),
            kpi_salary_floor: default_kpi_salary_floor(),
            histogram_salary_floor: default_histogram_salary_floor(),
            histogram_salary_ceiling: default_histogram_salary_ceiling(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = DashboardConfig::from_toml_str("", Path::new("test.toml")).unwrap();
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.charts.pie_cutoff, 5);
        assert_eq!(cfg.thresholds.min_samples, 5);
        assert_eq!(cfg.sources.delimiter_byte(), None);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let text = r#"
            [sources]
            stats = "data/job_data_clean.csv"
            delimiter = "|"

            [charts]
            trend_series = 3
        "#;
        let cfg = DashboardConfig::from_toml_str(text, Path::new("test.toml")).unwrap();
        assert_eq!(cfg.sources.stats, Some(PathBuf::from("data/job_data_clean.csv")));
        assert_eq!(cfg.sources.delimiter_byte(), Some(b'|'));
        assert_eq!(cfg.charts.trend_series, 3);
        assert_eq!(cfg.charts.max_bubbles, 60);
        assert_eq!(cfg.thresholds.ladder_salary_floor, 10_000.0);
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let text = include_str!("../jobscope.toml");
        let cfg = DashboardConfig::from_toml_str(text, Path::new("jobscope.toml")).unwrap();
        assert_eq!(cfg.charts, ChartConfig::default());
        assert_eq!(cfg.thresholds, ThresholdConfig::default());
        assert_eq!(cfg.sources.jobs, Some(PathBuf::from("data/jobs.json")));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = DashboardConfig::from_toml_str("[charts]\nbogus = 1\n", Path::new("x.toml"));
        assert!(matches!(err, Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DashboardConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(err, Err(ConfigError::Io { .. })));
    }
}
