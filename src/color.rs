use palette::{Hsl, IntoColor, Srgb};

use crate::stats::correlation::Strength;

// ---------------------------------------------------------------------------
// Fixed colours
// ---------------------------------------------------------------------------

/// Brand colours, assigned to chart slices/series in order.
pub const BRAND: [&str; 8] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
];

/// Colour of the synthetic "Other" pie slice.
pub const OTHER: &str = "#94A3B8";

/// Primary series colour.
pub const PRIMARY: &str = "#3B82F6";

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_hex(hue: f32, saturation: f32, lightness: f32) -> String {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    let rgb: Srgb<u8> = rgb.into_format();
    format!("#{:02X}{:02X}{:02X}", rgb.red, rgb.green, rgb.blue)
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_hex((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

/// `n` colours: the brand colours first, generated hues after that.
pub fn series_colors(n: usize) -> Vec<String> {
    let mut colors: Vec<String> = BRAND.iter().take(n).map(|c| c.to_string()).collect();
    if n > BRAND.len() {
        colors.extend(generate_palette(n - BRAND.len()));
    }
    colors
}

// ---------------------------------------------------------------------------
// Value → colour mappings
// ---------------------------------------------------------------------------

/// Colour for a correlation coefficient, by strength band.
pub fn correlation_color(r: f64) -> &'static str {
    match Strength::of(r) {
        Strength::StrongPositive => "#DC2626",
        Strength::ModeratePositive => "#F59E0B",
        Strength::Weak => "#E5E7EB",
        Strength::ModerateNegative => "#3B82F6",
        Strength::StrongNegative => "#1E40AF",
    }
}

/// Colour for a normalised intensity in `[0, 1]`: blue (low) to red (high).
pub fn intensity_color(t: f64) -> String {
    let t = t.clamp(0.0, 1.0) as f32;
    hsl_hex(240.0 - t * 240.0, 0.7, 0.5)
}
