use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use jobscope::data::metrics::{Quadrant, SkillCategory};

pub const ACCENT: Color32 = Color32::from_rgb(0, 200, 220);
pub const MUTED: Color32 = Color32::from_rgb(70, 70, 80);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: series label → Color32
// ---------------------------------------------------------------------------

/// Maps series labels (pie slices, trend lines) to distinct colours.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Assign colours to `labels` in order.
    pub fn new<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, c)| (label.to_string(), c))
            .collect();
        ColorMap { mapping }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}

pub fn quadrant_color(q: Quadrant) -> Color32 {
    match q {
        Quadrant::Commodity => Color32::from_rgb(0xff, 0x47, 0x57),
        Quadrant::HiddenGem => Color32::from_rgb(0x2e, 0xd5, 0x73),
        Quadrant::Elite => Color32::from_rgb(0xff, 0xa5, 0x02),
        Quadrant::Niche => Color32::from_rgb(0x53, 0x5c, 0x68),
    }
}

pub fn category_color(c: SkillCategory) -> Color32 {
    match c {
        SkillCategory::Programming => Color32::from_rgb(0x38, 0xbd, 0xf8),
        SkillCategory::BiViz => Color32::from_rgb(0xf9, 0x73, 0x16),
        SkillCategory::Cloud => Color32::from_rgb(0xa7, 0x8b, 0xfa),
        SkillCategory::MlAi => Color32::from_rgb(0x22, 0xc5, 0x5e),
        SkillCategory::Other => Color32::from_rgb(0x9c, 0xa3, 0xaf),
    }
}
