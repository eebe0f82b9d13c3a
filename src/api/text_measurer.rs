use serde::{Deserialize, Serialize};

/// Measured extent of a single line of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Host-provided text measurement (font shaping lives outside the engine).
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextSize;
}

/// Deterministic, backend-independent width estimate.
///
/// Digits and separators get narrower advances than letters, which is close
/// enough for axis-label sizing in headless hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatingTextMeasurer {
    pub line_height_ratio: f64,
}

impl Default for EstimatingTextMeasurer {
    fn default() -> Self {
        Self {
            line_height_ratio: 1.2,
        }
    }
}

impl TextMeasurer for EstimatingTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextSize {
        if text.is_empty() {
            return TextSize {
                width: 0.0,
                height: font_size_px * self.line_height_ratio,
            };
        }
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                _ => 0.58,
            }
        });
        TextSize {
            width: (units * font_size_px).max(font_size_px),
            height: font_size_px * self.line_height_ratio,
        }
    }
}
