use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use jobscope::data::model::JobRecord;
use jobscope::state::AppState;

use crate::color;

fn salary_text(job: &JobRecord) -> String {
    match job.salary_value {
        Some(v) => {
            let currency = if job.salary_currency.is_empty() {
                "$".to_string()
            } else {
                format!("{} ", job.salary_currency)
            };
            format!("{currency}{v:.0}")
        }
        None => "Not specified".to_string(),
    }
}

/// Result count and the first page of matching postings.
pub fn job_list(ui: &mut Ui, state: &mut AppState) {
    let page = &state.view().explorer;
    ui.heading(format!(
        "{} jobs found. Showing top {}.",
        page.total,
        page.shown.len()
    ));
    if page.total == 0 {
        ui.weak("No jobs match your criteria. Try removing some filters.");
        return;
    }

    let mut clicked = None;
    let records = state.explorer_records();
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::remainder().at_least(200.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder().at_least(160.0))
        .header(22.0, |mut header| {
            for title in ["Title", "Company", "Location", "Salary", "Skills"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for &(index, job) in &records {
                body.row(24.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        if ui.link(&job.title).clicked() {
                            clicked = Some(index);
                        }
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&job.company);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&job.location);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(salary_text(job));
                    });
                    row.col(|ui: &mut Ui| {
                        let preview: Vec<&str> =
                            job.technical_skills.iter().take(5).map(String::as_str).collect();
                        ui.label(preview.join(" · "));
                    });
                });
            }
        });

    if let Some(index) = clicked {
        state.select_job(index);
    }
}

fn tag_section(ui: &mut Ui, title: &str, tags: &[String]) {
    if tags.is_empty() {
        return;
    }
    ui.add_space(8.0);
    ui.label(RichText::new(title).strong().color(color::ACCENT));
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for tag in tags {
            ui.label(RichText::new(tag).background_color(color::MUTED));
        }
    });
}

/// Detail window for the selected posting.
pub fn job_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(job) = state.selected_job().cloned() else {
        return;
    };

    let mut open = true;
    egui::Window::new(&job.title)
        .id(egui::Id::new("job_detail"))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(560.0)
        .show(ctx, |ui: &mut Ui| {
            ui.label(RichText::new(format!("{} - {}", job.company, job.location)).heading());
            if !job.link.is_empty() {
                let text = if job.source.is_empty() || job.source == "N/A" {
                    "View original post".to_string()
                } else {
                    format!("View original post on {}", job.source)
                };
                ui.hyperlink_to(text, &job.link);
            }
            ui.label(format!(
                "{} · {} · {}",
                job.seniority_level,
                job.country,
                salary_text(&job)
            ));

            ui.add_space(8.0);
            ui.label(RichText::new("Full description").strong().color(color::ACCENT));
            egui::ScrollArea::vertical()
                .max_height(260.0)
                .show(ui, |ui: &mut Ui| {
                    ui.label(&job.description);
                });

            tag_section(ui, "Technical skills", &job.technical_skills);
            tag_section(ui, "Tools mentioned", &job.tools_used);
            tag_section(ui, "Domains", &job.domains);

            if !job.benefits.is_empty() {
                ui.add_space(8.0);
                ui.label(RichText::new("Benefits").strong().color(color::ACCENT));
                for b in &job.benefits {
                    ui.label(format!("• {b}"));
                }
            }
        });

    if !open {
        state.close_job();
    }
}
