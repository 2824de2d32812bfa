pub const DEFAULT_FONT_FAMILY: &str = "'Segoe UI', wf_segoe-ui_normal, helvetica, arial, sans-serif";

/// Converts typographic points to CSS pixels (96 dpi).
#[must_use]
pub fn point_to_px(points: f64) -> f64 {
    points * 4.0 / 3.0
}

/// Font description handed to a `TextMeasurer`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextProperties {
    pub font_family: String,
    pub font_size_px: f64,
}

impl TextProperties {
    #[must_use]
    pub fn from_points(points: f64) -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_size_px: point_to_px(points),
        }
    }
}

/// Rendered text metrics used by the layout passes.
pub trait TextMeasurer {
    fn measure_width(&self, text: &str, properties: &TextProperties) -> f64;
    fn measure_height(&self, text: &str, properties: &TextProperties) -> f64;
}

/// Deterministic, backend-independent text metrics.
///
/// Widths sum per-glyph advance factors; height is one line box.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl EstimatedTextMeasurer {
    const LINE_HEIGHT_FACTOR: f64 = 1.2;
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure_width(&self, text: &str, properties: &TextProperties) -> f64 {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                'i' | 'l' | 'j' | 'I' | '!' | '|' => 0.28,
                'm' | 'w' | 'M' | 'W' => 0.86,
                _ => 0.58,
            }
        });
        units * properties.font_size_px
    }

    fn measure_height(&self, text: &str, properties: &TextProperties) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        properties.font_size_px * Self::LINE_HEIGHT_FACTOR
    }
}
