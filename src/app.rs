use eframe::egui::{self, Ui};

use jobscope::config::DashboardConfig;
use jobscope::data::normalize::SourceKind;
use jobscope::state::AppState;

use crate::ui::{explorer, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct JobscopeApp {
    pub state: AppState,
}

impl JobscopeApp {
    /// Build the app and load the configured start-up source, jobs feed
    /// first. A failed load leaves the dashboard empty with the error shown.
    pub fn new(config: DashboardConfig) -> Self {
        let startup = [
            (config.sources.jobs.clone(), SourceKind::JobsFeed),
            (config.sources.stats.clone(), SourceKind::StatsFeed),
        ]
        .into_iter()
        .find_map(|(path, kind)| path.filter(|p| p.exists()).map(|p| (p, kind)));

        let mut state = AppState::new(config);
        if let Some((path, kind)) = startup {
            // the error is already logged and kept as the status message
            let _ = state.load_path(&path, kind);
        }
        Self { state }
    }
}

impl eframe::App for JobscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and explorer ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset().is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.label("Open a jobs or stats feed from the File menu.");
                });
                return;
            }
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &mut self.state));
        });

        explorer::job_window(ctx, &mut self.state);
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let view = state.view().clone();
    let focus = state.focus_skill().map(str::to_string);

    plot::kpi_row(ui, &view.kpis, &view.ladder.multiplier_label());
    ui.separator();

    ui.columns(2, |cols| {
        plot::bar_chart(&mut cols[0], "tech_skills", "Top technical skills", &view.tech_skills);
        plot::bar_chart(&mut cols[1], "tools", "Top tools", &view.tools);
    });
    ui.columns(2, |cols| {
        plot::bar_chart(&mut cols[0], "countries", "Postings by country", &view.countries);
        plot::bar_chart(&mut cols[1], "domains", "Postings by domain", &view.domains);
    });
    ui.columns(2, |cols| {
        plot::bar_chart(&mut cols[0], "titles", "Top job titles", &view.top_titles);
        plot::bar_chart(&mut cols[1], "companies", "Top hiring companies", &view.top_companies);
    });
    ui.columns(4, |cols| {
        plot::pie_chart(&mut cols[0], "Seniority", &view.seniority_pie);
        plot::pie_chart(&mut cols[1], "Source", &view.source_pie);
        plot::pie_chart(&mut cols[2], "Work policy", &view.hybrid_pie);
        plot::pie_chart(&mut cols[3], "Visa sponsorship", &view.visa_pie);
    });
    ui.separator();

    ui.columns(2, |cols| {
        plot::histogram(&mut cols[0], "salary_histogram", &view.salary_histogram);
        plot::ladder_chart(&mut cols[1], &view.ladder);
    });
    plot::volume_chart(ui, &view.volume);
    ui.separator();

    if let Some(skill) = plot::bubble_universe(ui, &view.skill_bubbles, focus.as_deref()) {
        state.toggle_focus_skill(&skill);
    }
    plot::trend_chart(ui, &view.skill_trends, focus.as_deref());
    plot::value_scatter(ui, &view.skill_value);
    ui.separator();

    explorer::job_list(ui, state);
}
