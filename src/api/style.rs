use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Fixed presentation parameters not exposed through host settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    /// Used when an axis `color` setting is empty or unparsable.
    pub axis_label_color: Color,
    /// Used when a band color and the palette default are both unparsable.
    pub fallback_band_color: Color,
    /// Gap between value tick labels and the plot's left edge.
    pub value_label_gap_px: f64,
    /// Gap between the plot's bottom edge and category labels.
    pub category_label_gap_px: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            grid_line_color: Color::rgb(0.88, 0.88, 0.88),
            grid_line_width: 1.0,
            axis_label_color: Color::rgb(0.47, 0.47, 0.47),
            fallback_band_color: Color::rgb(0.004, 0.722, 0.667),
            value_label_gap_px: 6.0,
            category_label_gap_px: 6.0,
        }
    }
}

impl ChartStyle {
    pub fn validate(self) -> ChartResult<Self> {
        self.grid_line_color.validate()?;
        self.axis_label_color.validate()?;
        self.fallback_band_color.validate()?;
        for (name, value) in [
            ("grid_line_width", self.grid_line_width),
            ("value_label_gap_px", self.value_label_gap_px),
            ("category_label_gap_px", self.category_label_gap_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "style `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.grid_line_width == 0.0 {
            return Err(ChartError::InvalidData(
                "style `grid_line_width` must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}
