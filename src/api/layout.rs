use tracing::trace;

use crate::core::{CategoryBandScale, LinearScale, PlotArea, Viewport, recommended_value_tick_count};
use crate::error::{ChartError, ChartResult};
use crate::model::Model;

use super::{TextMeasurer, TextProperties};

pub const MIN_VIEWPORT_WIDTH: u32 = 100;
pub const MIN_VIEWPORT_HEIGHT: u32 = 100;
/// Base inset added to the widest value label.
pub const MIN_VALUE_AXIS_WIDTH: f64 = 30.0;
/// Base inset added to one category label line.
pub const MIN_CATEGORY_AXIS_HEIGHT: f64 = 20.0;
pub const CATEGORY_BAND_PADDING: f64 = 0.1;
pub const CATEGORY_OUTER_PADDING: f64 = 0.5;
/// Pixel inset at both ends of the value range.
pub const VALUE_OUTER_PADDING_PX: f64 = 0.5;
pub const ROTATED_LABEL_ANGLE_DEG: f64 = -35.0;
/// Horizontal nudge for rotated labels, in ems.
pub const ROTATED_LABEL_DX_EM: f64 = -0.5;
pub const LABEL_HEIGHT_PROBE: &str = "Ag";

/// Category tick label placement chosen for a whole render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOrientation {
    /// Horizontal, centered under the band.
    Horizontal,
    /// Rotated by `ROTATED_LABEL_ANGLE_DEG`, right-anchored.
    Rotated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueTick {
    pub value: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLabel {
    pub index: usize,
    pub text: String,
    pub x: f64,
    pub width: f64,
}

/// Geometry and scales for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub viewport: Viewport,
    pub plot_area: PlotArea,
    pub value_axis_width: f64,
    pub category_axis_height: f64,
    pub label_height: f64,
    pub value_scale: LinearScale,
    pub category_scale: CategoryBandScale,
    /// Value ticks; each one also yields a full-width grid line.
    pub value_ticks: Vec<ValueTick>,
    pub category_labels: Vec<CategoryLabel>,
    pub label_orientation: LabelOrientation,
    pub value_font_px: f64,
    pub category_font_px: f64,
}

impl ChartLayout {
    #[must_use]
    pub fn plot_origin(&self) -> (f64, f64) {
        (self.plot_area.x, self.plot_area.y)
    }

    #[must_use]
    pub fn label_rotated(&self) -> bool {
        self.label_orientation == LabelOrientation::Rotated
    }

    /// Y positions of the horizontal grid lines.
    #[must_use]
    pub fn grid_line_ys(&self) -> Vec<f64> {
        self.value_ticks.iter().map(|tick| tick.y).collect()
    }
}

/// Two-pass axis layout.
///
/// Pass one reserves axis space from measured label extents before the plot
/// size is known; pass two builds scales over the remaining area and decides
/// category label rotation from the resulting band width. The reservation is
/// a single estimate, not iterated to a fixed point.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    pub fn layout(
        &self,
        model: &Model,
        viewport: Viewport,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<ChartLayout> {
        if viewport.width < MIN_VIEWPORT_WIDTH || viewport.height < MIN_VIEWPORT_HEIGHT {
            return Err(ChartError::ViewportTooSmall {
                width: viewport.width,
                height: viewport.height,
                min_width: MIN_VIEWPORT_WIDTH,
                min_height: MIN_VIEWPORT_HEIGHT,
            });
        }

        let value_settings = &model.settings.value_axis;
        let category_settings = &model.settings.category_axis;
        let value_text = TextProperties::from_points(value_settings.font_size);
        let category_text = TextProperties::from_points(category_settings.font_size);

        let value_axis_width = if value_settings.show {
            let min_label = model.value_formatter.format_number(model.min_y);
            let max_label = model.value_formatter.format_number(model.max_y);
            MIN_VALUE_AXIS_WIDTH
                + measurer
                    .measure_width(&min_label, &value_text)
                    .max(measurer.measure_width(&max_label, &value_text))
        } else {
            0.0
        };
        let label_height = measurer.measure_height(LABEL_HEIGHT_PROBE, &category_text);
        let category_axis_height = if category_settings.show {
            MIN_CATEGORY_AXIS_HEIGHT + label_height
        } else {
            0.0
        };

        let plot_area = PlotArea::new(
            value_axis_width,
            label_height,
            (f64::from(viewport.width) - value_axis_width).max(1.0),
            (f64::from(viewport.height) - category_axis_height - label_height).max(1.0),
        );

        let value_scale = build_value_scale(model.min_y, model.max_y, plot_area)?;
        let value_ticks = value_scale
            .ticks(recommended_value_tick_count(plot_area.height))
            .into_iter()
            .map(|value| ValueTick {
                value,
                y: value_scale.value_to_pixel(value),
                label: model.value_formatter.format_number(value),
            })
            .collect();

        let category_scale = CategoryBandScale::new(
            model.data_points.len(),
            plot_area.x,
            plot_area.right(),
            CATEGORY_BAND_PADDING,
            CATEGORY_OUTER_PADDING,
        )?;

        let (category_labels, label_orientation) = if category_settings.show {
            let labels: Vec<CategoryLabel> = model
                .data_points
                .iter()
                .enumerate()
                .filter_map(|(index, point)| {
                    let x = category_scale.band_center(index)?;
                    Some(CategoryLabel {
                        index,
                        width: measurer.measure_width(&point.category_label, &category_text),
                        text: point.category_label.clone(),
                        x,
                    })
                })
                .collect();
            let orientation = resolve_label_orientation(&labels, category_scale.slot_width());
            (labels, orientation)
        } else {
            (Vec::new(), LabelOrientation::Horizontal)
        };

        trace!(
            value_axis_width,
            category_axis_height,
            label_height,
            plot_width = plot_area.width,
            plot_height = plot_area.height,
            rotated = label_orientation == LabelOrientation::Rotated,
            "resolved variance chart layout"
        );

        Ok(ChartLayout {
            viewport,
            plot_area,
            value_axis_width,
            category_axis_height,
            label_height,
            value_scale,
            category_scale,
            value_ticks,
            category_labels,
            label_orientation,
            value_font_px: value_text.font_size_px,
            category_font_px: category_text.font_size_px,
        })
    }
}

fn build_value_scale(min_y: f64, max_y: f64, plot_area: PlotArea) -> ChartResult<LinearScale> {
    if min_y > max_y {
        return Err(ChartError::InvalidData(format!(
            "value domain is inverted: min {min_y} > max {max_y}"
        )));
    }
    // A single distinct value still needs a drawable span.
    let (domain_start, domain_end) = if min_y == max_y {
        let pad = 1f64.max(min_y.abs() * 1e-9);
        (min_y - pad, max_y + pad)
    } else {
        (min_y, max_y)
    };
    LinearScale::new(
        domain_start,
        domain_end,
        plot_area.bottom() - VALUE_OUTER_PADDING_PX,
        plot_area.y + VALUE_OUTER_PADDING_PX,
    )
}

/// All-or-nothing: one overflowing label rotates every label.
#[must_use]
pub fn resolve_label_orientation(labels: &[CategoryLabel], slot_width: f64) -> LabelOrientation {
    if labels.iter().all(|label| label.width <= slot_width) {
        LabelOrientation::Horizontal
    } else {
        LabelOrientation::Rotated
    }
}
