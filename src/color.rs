use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

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
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

fn hex(rgb: u32) -> Srgb {
    Srgb::new(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    )
}

// ---------------------------------------------------------------------------
// Fixed category colours
// ---------------------------------------------------------------------------

pub const UNCATEGORISED: Color32 = Color32::from_rgb(0x80, 0x80, 0x80);

pub fn sentiment_color(sentiment: &str) -> Color32 {
    match sentiment {
        "Positive" => Color32::from_rgb(0x2e, 0x8b, 0x57),
        "Neutral" => Color32::from_rgb(0x46, 0x82, 0xb4),
        "Negative" => Color32::from_rgb(0xcd, 0x5c, 0x5c),
        "Mixed" => Color32::from_rgb(0x93, 0x70, 0xdb),
        _ => UNCATEGORISED,
    }
}

pub fn severity_color(severity: &str) -> Color32 {
    match severity {
        "Critical" => Color32::from_rgb(0xd3, 0x2f, 0x2f),
        "High" => Color32::from_rgb(0xf5, 0x7c, 0x00),
        "Medium" => Color32::from_rgb(0xfb, 0xc0, 0x2d),
        "Low" => Color32::from_rgb(0x7c, 0xb3, 0x42),
        _ => UNCATEGORISED,
    }
}

// ---------------------------------------------------------------------------
// Continuous scales: value in [0, 1] → Color32
// ---------------------------------------------------------------------------

/// A piecewise-linear gradient interpolated in linear RGB.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<LinSrgb>,
}

impl ColorScale {
    fn from_hex(stops: &[u32]) -> Self {
        Self {
            stops: stops.iter().map(|&c| hex(c).into_linear()).collect(),
        }
    }

    /// Dark purple → teal → yellow.
    pub fn viridis() -> Self {
        Self::from_hex(&[0x440154, 0x3b528b, 0x21918c, 0x5ec962, 0xfde725])
    }

    /// Blue → white → red, for signed values mapped into [0, 1].
    pub fn diverging() -> Self {
        Self::from_hex(&[0x2166ac, 0xf7f7f7, 0xb2182b])
    }

    pub fn reds() -> Self {
        Self::from_hex(&[0xfee0d2, 0xfc9272, 0xde2d26])
    }

    pub fn blues() -> Self {
        Self::from_hex(&[0xdeebf7, 0x9ecae1, 0x3182bd])
    }

    /// Colour at `t`, clamped to [0, 1]. NaN maps to the first stop.
    pub fn at(&self, t: f64) -> Color32 {
        let Some(last) = self.stops.len().checked_sub(1) else {
            return UNCATEGORISED;
        };
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) as f32 };
        let pos = t * last as f32;
        let i = (pos.floor() as usize).min(last);
        let j = (i + 1).min(last);
        let mixed = self.stops[i].mix(self.stops[j], pos - i as f32);
        to_color32(Srgb::from_linear(mixed))
    }

    /// Colour for `value` within `[min, max]`.
    pub fn at_range(&self, value: f64, min: f64, max: f64) -> Color32 {
        if max > min {
            self.at((value - min) / (max - min))
        } else {
            self.at(1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colors() {
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn scale_endpoints_hit_first_and_last_stop() {
        let scale = ColorScale::diverging();
        assert_eq!(scale.at(0.0), Color32::from_rgb(0x21, 0x66, 0xac));
        assert_eq!(scale.at(1.0), Color32::from_rgb(0xb2, 0x18, 0x2b));
        assert_eq!(scale.at(7.0), scale.at(1.0));
        assert_eq!(scale.at(f64::NAN), scale.at(0.0));
    }

    #[test]
    fn unknown_sentiment_is_grey() {
        assert_eq!(sentiment_color("Ecstatic"), UNCATEGORISED);
        assert_ne!(sentiment_color("Positive"), UNCATEGORISED);
    }
}
