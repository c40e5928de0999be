use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Hue of the first bar for each chart, so the charts read as distinct.
pub const GENDER_HUE: f32 = 200.0;
pub const AGE_HUE: f32 = 30.0;
pub const CLASS_HUE: f32 = 140.0;

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting at `start_hue` degrees.
pub fn generate_palette(n: usize, start_hue: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (start_hue + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// A single colour for series drawn in one tone (the age histogram).
pub fn single(hue: f32) -> Color32 {
    generate_palette(1, hue)[0]
}
