use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, HLine, Legend, Line, Plot, Points, VLine};

use jobscope::data::aggregate::AggregateEntry;
use jobscope::data::metrics::{
    HistogramBin, Kpis, Quadrant, SeniorityLadder, SkillBubble, SkillSeries, SkillValueMap, VolumeSeries,
};
use jobscope::data::model::YearMonth;

use crate::color::{self, ColorMap};

const CHART_HEIGHT: f32 = 240.0;

fn empty_note(ui: &mut Ui, title: &str) {
    ui.strong(title);
    ui.weak("No data for the current filters.");
}

/// Label for an integral axis mark, empty between marks.
fn category_label(labels: &[String], value: f64) -> String {
    if (value - value.round()).abs() > 1e-6 || value < 0.0 {
        return String::new();
    }
    labels.get(value.round() as usize).cloned().unwrap_or_default()
}

fn thousands(v: f64) -> String {
    format!("${:.0}k", v / 1000.0)
}

// ---------------------------------------------------------------------------
// KPIs
// ---------------------------------------------------------------------------

pub fn kpi_row(ui: &mut Ui, kpis: &Kpis, multiplier: &str) {
    let cards = [
        ("Job postings", kpis.total_postings.to_string()),
        ("Companies", kpis.distinct_companies.to_string()),
        ("Countries", kpis.distinct_countries.to_string()),
        ("Median salary", kpis.median_salary_label()),
        ("Top skill", kpis.top_skill.clone().unwrap_or_else(|| "–".into())),
        ("Seniority multiplier", multiplier.to_string()),
    ];
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (title, value) in cards {
            ui.group(|ui: &mut Ui| {
                ui.vertical(|ui: &mut Ui| {
                    ui.weak(title);
                    ui.label(RichText::new(value).heading().color(color::ACCENT));
                });
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Bars
// ---------------------------------------------------------------------------

/// Horizontal ranking, largest bucket on top.
pub fn bar_chart(ui: &mut Ui, id: &str, title: &str, entries: &[AggregateEntry]) {
    if entries.is_empty() {
        empty_note(ui, title);
        return;
    }
    ui.strong(title);

    let n = entries.len();
    // y = 0 is the bottom bar
    let labels: Vec<String> = entries.iter().rev().map(|e| e.name.clone()).collect();
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            Bar::new((n - 1 - i) as f64, e.count as f64)
                .name(&e.name)
                .width(0.7)
        })
        .collect();

    let chart = BarChart::new(bars)
        .horizontal()
        .color(color::ACCENT)
        .element_formatter(Box::new(|bar: &Bar, _: &BarChart| format!("{}: {}", bar.name, bar.value)));

    Plot::new(id)
        .height(CHART_HEIGHT.max(n as f32 * 18.0))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show_grid([true, false])
        .y_axis_formatter(move |mark, _| category_label(&labels, mark.value))
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

pub fn histogram(ui: &mut Ui, id: &str, bins: &[HistogramBin]) {
    let title = "Annual salary distribution (USD)";
    if bins.is_empty() {
        empty_note(ui, title);
        return;
    }
    ui.strong(title);

    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new((b.lo + b.hi) / 2.0, b.count as f64)
                .width((b.hi - b.lo).max(1.0) * 0.95)
                .name(format!("{} - {}", thousands(b.lo), thousands(b.hi)))
        })
        .collect();
    let chart = BarChart::new(bars)
        .color(color::ACCENT)
        .element_formatter(Box::new(|bar: &Bar, _: &BarChart| format!("{}\n{} jobs", bar.name, bar.value)));

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_formatter(|mark, _| thousands(mark.value))
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

pub fn ladder_chart(ui: &mut Ui, ladder: &SeniorityLadder) {
    let title = "Median salary by seniority (USD)";
    if ladder.rungs.is_empty() {
        empty_note(ui, title);
        return;
    }
    ui.strong(format!("{title}  ·  multiplier {}", ladder.multiplier_label()));

    let labels: Vec<String> = ladder.rungs.iter().map(|r| capitalize(&r.level)).collect();
    let bars: Vec<Bar> = ladder
        .rungs
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.median_salary)
                .width(0.6)
                .name(format!("{} ({} postings)", capitalize(&r.level), r.samples))
        })
        .collect();
    let chart = BarChart::new(bars)
        .color(color::ACCENT)
        .element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
            format!("{}\nMedian: {}", bar.name, thousands(bar.value))
        }));

    Plot::new("seniority_ladder")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .include_y(0.0)
        .x_axis_formatter(move |mark, _| category_label(&labels, mark.value))
        .y_axis_formatter(|mark, _| thousands(mark.value))
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Pies
// ---------------------------------------------------------------------------

pub fn pie_chart(ui: &mut Ui, title: &str, entries: &[AggregateEntry]) {
    let total: usize = entries.iter().map(|e| e.count).sum();
    if total == 0 {
        empty_note(ui, title);
        return;
    }
    ui.strong(title);

    let colors = if entries.len() == 2 {
        ColorMap::default()
    } else {
        ColorMap::new(entries.iter().map(|e| e.name.as_str()))
    };
    let slice_color = |i: usize, name: &str| match (entries.len(), i) {
        (2, 0) => color::ACCENT,
        (2, _) => color::MUTED,
        _ => colors.color_for(name),
    };

    let (rect, response) = ui.allocate_exact_size(Vec2::splat(150.0), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = rect.width() / 2.0 - 4.0;

    let mut start = -FRAC_PI_2;
    let mut spans = Vec::with_capacity(entries.len());
    for (i, e) in entries.iter().enumerate() {
        let sweep = TAU * e.count as f32 / total as f32;
        let steps = ((sweep / 0.05).ceil() as usize).max(1);
        for step in 0..steps {
            let a0 = start + sweep * step as f32 / steps as f32;
            let a1 = start + sweep * (step + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![
                    center,
                    center + radius * Vec2::angled(a0),
                    center + radius * Vec2::angled(a1),
                ],
                slice_color(i, &e.name),
                Stroke::NONE,
            ));
        }
        spans.push((start, start + sweep));
        start += sweep;
    }

    if let Some(pos) = response.hover_pos() {
        let v = pos - center;
        if v.length() <= radius {
            let mut angle = v.y.atan2(v.x);
            if angle < -FRAC_PI_2 {
                angle += TAU;
            }
            if let Some(i) = spans.iter().position(|&(a, b)| angle >= a && angle < b) {
                let e = &entries[i];
                response.on_hover_text(format!(
                    "{}: {} ({:.0}%)",
                    e.name,
                    e.count,
                    100.0 * e.count as f64 / total as f64
                ));
            }
        }
    }

    for (i, e) in entries.iter().enumerate() {
        ui.horizontal(|ui: &mut Ui| {
            ui.colored_label(slice_color(i, &e.name), "■");
            ui.label(format!("{} ({})", e.name, e.count));
        });
    }
}

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

fn month_points(points: impl Iterator<Item = (YearMonth, usize)>) -> Vec<[f64; 2]> {
    points
        .map(|(month, count)| [month.ordinal() as f64, count as f64])
        .collect()
}

fn month_axis(mark: egui_plot::GridMark) -> String {
    if (mark.value - mark.value.round()).abs() > 1e-6 {
        return String::new();
    }
    YearMonth::from_ordinal(mark.value.round() as i64).to_string()
}

pub fn volume_chart(ui: &mut Ui, volume: &VolumeSeries) {
    let title = "Job postings per month";
    let Some((lo, hi)) = volume.axis else {
        empty_note(ui, title);
        return;
    };
    ui.strong(title);

    let all = Line::new(month_points(volume.baseline.iter().map(|m| (m.month, m.count))))
        .name("All postings")
        .color(color::MUTED)
        .width(2.0);
    let filtered = Line::new(month_points(volume.filtered.iter().map(|m| (m.month, m.count))))
        .name("Filtered")
        .color(color::ACCENT)
        .width(2.0);

    Plot::new("job_volume")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .include_x(lo.ordinal() as f64)
        .include_x(hi.ordinal() as f64)
        .include_y(0.0)
        .x_axis_formatter(|mark, _| month_axis(mark))
        .show(ui, |plot_ui| {
            plot_ui.line(all);
            plot_ui.line(filtered);
        });
}

pub fn trend_chart(ui: &mut Ui, series: &[SkillSeries], focus: Option<&str>) {
    let title = match focus {
        Some(skill) => format!("Trend for {skill}"),
        None => "Top skill trends".to_string(),
    };
    if series.is_empty() {
        empty_note(ui, &title);
        return;
    }
    ui.strong(title);

    let colors = ColorMap::new(series.iter().map(|s| s.skill.as_str()));
    Plot::new("skill_trends")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .include_y(0.0)
        .x_axis_formatter(|mark, _| month_axis(mark))
        .show(ui, |plot_ui| {
            for s in series {
                let line = Line::new(month_points(s.points.iter().map(|m| (m.month, m.count))))
                    .name(&s.skill)
                    .color(colors.color_for(&s.skill))
                    .width(2.0);
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Skill value map
// ---------------------------------------------------------------------------

/// Mentions on a log10 axis against mean salary, median cross-hairs.
pub fn value_scatter(ui: &mut Ui, map: &SkillValueMap) {
    let title = "Skill popularity vs value";
    let (Some(median_mentions), Some(median_salary)) = (map.median_mentions, map.median_salary)
    else {
        empty_note(ui, title);
        return;
    };
    ui.strong(title);
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for q in [Quadrant::HiddenGem, Quadrant::Elite, Quadrant::Commodity, Quadrant::Niche] {
            ui.colored_label(color::quadrant_color(q), format!("● {}", q.label()));
        }
    });

    Plot::new("skill_value")
        .height(CHART_HEIGHT * 1.5)
        .x_axis_formatter(|mark, _| format!("{:.0}", 10f64.powf(mark.value)))
        .y_axis_formatter(|mark, _| thousands(mark.value))
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!(
                    "{name}\n{} mentions\navg {}",
                    10f64.powf(value.x).round(),
                    thousands(value.y)
                )
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.vline(VLine::new(median_mentions.log10()).color(color::MUTED));
            plot_ui.hline(HLine::new(median_salary).color(color::MUTED));
            for p in &map.points {
                let radius = ((p.mentions as f32).sqrt() * 0.8).max(3.0);
                let point = Points::new(vec![[(p.mentions as f64).log10(), p.avg_salary]])
                    .name(format!("{} · {}", p.skill, p.quadrant.label()))
                    .color(color::quadrant_color(p.quadrant))
                    .radius(radius);
                plot_ui.points(point);
            }
        });
}

// ---------------------------------------------------------------------------
// Skill bubbles
// ---------------------------------------------------------------------------

/// Clickable skill cloud sized by mentions. Returns the clicked skill.
pub fn bubble_universe(ui: &mut Ui, bubbles: &[SkillBubble], focus: Option<&str>) -> Option<String> {
    let title = "Skill universe (click to focus the trend chart)";
    if bubbles.is_empty() {
        empty_note(ui, title);
        return None;
    }
    ui.strong(title);

    let max = bubbles.iter().map(|b| b.count).max().unwrap_or(1).max(1) as f32;
    let mut clicked = None;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for b in bubbles {
            let size = 11.0 + 13.0 * (b.count as f32 / max).sqrt();
            let pinned = focus.is_some_and(|f| f.eq_ignore_ascii_case(&b.skill));
            let button = egui::Button::new(RichText::new(&b.short_label).size(size).color(Color32::BLACK))
                .fill(color::category_color(b.category))
                .stroke(if pinned {
                    Stroke::new(2.0, Color32::WHITE)
                } else {
                    Stroke::NONE
                });
            let response = ui
                .add(button)
                .on_hover_text(format!("{}\n{} mentions\n{}", b.skill, b.count, b.category.label()));
            if response.clicked() {
                clicked = Some(b.skill.clone());
            }
        }
    });
    clicked
}
