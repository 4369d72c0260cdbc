use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use jobscope::data::filter::Period;
use jobscope::data::normalize::SourceKind;
use jobscope::state::{AppState, FilterGroup};

const PERIODS: [(&str, Option<u32>); 3] = [
    ("All time", None),
    ("Last 30 days", Some(30)),
    ("Last 90 days", Some(90)),
];

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. Every change goes through an `AppState`
/// mutator, which recomputes the view.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset().is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Search title / description");
            let mut text = state.filters().text.clone();
            if ui.text_edit_singleline(&mut text).changed() {
                state.set_text(&text);
            }
            ui.add_space(6.0);

            let mut floor = state.filters().min_salary;
            let slider = egui::Slider::new(&mut floor, 0.0..=300_000.0)
                .step_by(5_000.0)
                .custom_formatter(|v, _| format!("${:.0}k", v / 1000.0))
                .text("Min salary");
            if ui.add(slider).changed() {
                state.set_min_salary(floor);
            }

            let mut hybrid = state.filters().hybrid_only;
            if ui.checkbox(&mut hybrid, "Hybrid / remote only").changed() {
                state.set_hybrid_only(hybrid);
            }
            let mut visa = state.filters().visa_only;
            if ui.checkbox(&mut visa, "Visa sponsorship only").changed() {
                state.set_visa_only(visa);
            }

            let current = match state.filters().period {
                Period::AllTime => None,
                Period::LastDays { days, .. } => Some(days),
            };
            let current_label = PERIODS
                .iter()
                .find(|(_, days)| *days == current)
                .map_or("Custom", |(label, _)| *label);
            egui::ComboBox::from_id_salt("period")
                .selected_text(current_label)
                .show_ui(ui, |ui: &mut Ui| {
                    for (label, days) in PERIODS {
                        if ui.selectable_label(current == days, label).clicked() {
                            state.set_period(days, chrono::Local::now().date_naive());
                        }
                    }
                });
            ui.separator();

            // ---- Per-group multi-selects (collapsible) ----
            for group in FilterGroup::ALL {
                let values = state.options().values(group).to_vec();
                let n_selected = group.selection(state.filters()).len();
                let header_text = format!("{}  ({n_selected}/{})", group.label(), values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(group.label())
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        if ui.small_button("Clear").clicked() {
                            state.clear_group(group);
                        }
                        ScrollArea::vertical()
                            .id_salt(group.label())
                            .max_height(220.0)
                            .show(ui, |ui: &mut Ui| {
                                for val in &values {
                                    let mut checked = group.selection(state.filters()).contains(val);
                                    if ui.checkbox(&mut checked, val).changed() {
                                        state.toggle_filter_value(group, val);
                                    }
                                }
                            });
                    });
            }

            ui.separator();
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open jobs feed…").clicked() {
                open_file_dialog(state, SourceKind::JobsFeed);
                ui.close_menu();
            }
            if ui.button("Open stats feed…").clicked() {
                open_file_dialog(state, SourceKind::StatsFeed);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(kind)) = (state.dataset(), state.source_kind()) {
            ui.label(format!(
                "{} postings loaded ({}), {} match",
                ds.len(),
                kind.label(),
                state.visible_indices().len()
            ));
        }

        if let Some(skill) = state.focus_skill().map(str::to_string) {
            ui.separator();
            if ui.button(format!("Focus: {skill}  ✕")).clicked() {
                state.toggle_focus_skill(&skill);
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, kind: SourceKind) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Open {}", kind.label()))
        .add_filter("Supported files", &["json", "csv", "txt", "psv"])
        .add_filter("JSON", &["json"])
        .add_filter("Delimited text", &["csv", "txt", "psv"])
        .pick_file();

    if let Some(path) = file {
        // the error is already logged and kept as the status message
        let _ = state.load_path(&path, kind);
    }
}
