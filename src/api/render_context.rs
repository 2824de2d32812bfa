use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::interaction::{SelectionKey, SelectionState};
use crate::model::{Model, TooltipField};
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::{ChartLayout, ChartStyle, ROTATED_LABEL_ANGLE_DEG, ROTATED_LABEL_DX_EM};

/// Painted geometry of one band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandGeometry {
    pub range_index: usize,
    pub rect: RectPrimitive,
}

/// What a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Element { index: usize, range_index: usize },
    /// The full-viewport clear catcher beneath every element.
    Background,
}

/// Tooltip content for the element under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipPayload {
    pub key: SelectionKey,
    pub fields: Vec<TooltipField>,
}

/// Immutable result of one update cycle: model, layout and band geometry.
///
/// A new context replaces the previous one wholesale; selection changes
/// derive a new context through `reselect`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    model: Model,
    layout: ChartLayout,
    elements: Vec<SmallVec<[BandGeometry; 5]>>,
    value_label_color: Color,
    category_label_color: Color,
    style: ChartStyle,
}

impl RenderContext {
    #[must_use]
    pub fn new(model: Model, layout: ChartLayout, style: ChartStyle) -> Self {
        let value_scale = layout.value_scale;
        let category_scale = layout.category_scale;
        let elements: Vec<SmallVec<[BandGeometry; 5]>> = model
            .data_points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let Some(x) = category_scale.band_start(index) else {
                    return SmallVec::new();
                };
                point
                    .ranges
                    .iter()
                    .enumerate()
                    .map(|(range_index, range)| {
                        if range.is_inverted() {
                            debug!(
                                category = %point.category_label,
                                min = range.min_value,
                                max = range.max_value,
                                "inverted range painted between its endpoints"
                            );
                        }
                        let y_min = value_scale.value_to_pixel(range.min_value);
                        let y_max = value_scale.value_to_pixel(range.max_value);
                        let fill = resolve_color(&range.color, style.fallback_band_color);
                        BandGeometry {
                            range_index,
                            rect: RectPrimitive::new(
                                x,
                                y_min.min(y_max),
                                category_scale.band_width(),
                                (y_min - y_max).abs(),
                                fill,
                            ),
                        }
                    })
                    .collect()
            })
            .collect();

        let value_label_color =
            resolve_axis_color(&model.settings.value_axis.color, style.axis_label_color);
        let category_label_color =
            resolve_axis_color(&model.settings.category_axis.color, style.axis_label_color);

        Self {
            model,
            layout,
            elements,
            value_label_color,
            category_label_color,
            style,
        }
    }

    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    #[must_use]
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.layout.viewport
    }

    #[must_use]
    pub fn element_bands(&self, index: usize) -> &[BandGeometry] {
        self.elements
            .get(index)
            .map(|bands| bands.as_slice())
            .unwrap_or(&[])
    }

    /// Copy of this context with `is_selected` re-derived from `state`.
    #[must_use]
    pub fn reselect(mut self, state: &SelectionState) -> Self {
        for point in &mut self.model.data_points {
            point.is_selected = state.is_selected(&point.selection_key);
        }
        self
    }

    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> HitTarget {
        let Some(index) = self.layout.category_scale.index_at(x) else {
            return HitTarget::Background;
        };
        // Later bands paint on top, so they win overlapping hits.
        self.element_bands(index)
            .iter()
            .rev()
            .find(|band| {
                let rect = band.rect;
                y >= rect.y && y <= rect.y + rect.height
            })
            .map_or(HitTarget::Background, |band| HitTarget::Element {
                index,
                range_index: band.range_index,
            })
    }

    #[must_use]
    pub fn tooltip_at(&self, x: f64, y: f64) -> Option<TooltipPayload> {
        let HitTarget::Element { index, range_index } = self.hit_test(x, y) else {
            return None;
        };
        let point = self.model.data_points.get(index)?;
        let range = point.ranges.get(range_index)?;
        Some(TooltipPayload {
            key: point.selection_key.clone(),
            fields: range.tooltip_fields.clone(),
        })
    }

    /// Paint commands with one opacity per element.
    pub fn build_frame(&self, opacities: &[f64]) -> ChartResult<RenderFrame> {
        let layout = &self.layout;
        let plot = layout.plot_area;
        let mut frame = RenderFrame::new(layout.viewport);

        for tick in &layout.value_ticks {
            frame.lines.push(LinePrimitive::new(
                plot.x,
                tick.y,
                plot.right(),
                tick.y,
                self.style.grid_line_width,
                self.style.grid_line_color,
            ));
        }

        for (index, bands) in self.elements.iter().enumerate() {
            let opacity = opacities.get(index).copied().unwrap_or(1.0);
            for band in bands {
                let mut rect = band.rect;
                rect.fill_color = rect.fill_color.with_alpha(rect.fill_color.alpha * opacity);
                frame.rects.push(rect);
            }
        }

        if self.model.settings.value_axis.show {
            let label_x = plot.x - self.style.value_label_gap_px;
            for tick in &layout.value_ticks {
                frame.texts.push(TextPrimitive::new(
                    tick.label.clone(),
                    label_x,
                    tick.y - layout.value_font_px * 0.5,
                    layout.value_font_px,
                    self.value_label_color,
                    TextHAlign::Right,
                ));
            }
        }

        let label_y = plot.bottom() + self.style.category_label_gap_px;
        for label in &layout.category_labels {
            if label.text.is_empty() {
                continue;
            }
            let text = if layout.label_rotated() {
                TextPrimitive::new(
                    label.text.clone(),
                    label.x + ROTATED_LABEL_DX_EM * layout.category_font_px,
                    label_y,
                    layout.category_font_px,
                    self.category_label_color,
                    TextHAlign::Right,
                )
                .rotated(ROTATED_LABEL_ANGLE_DEG)
            } else {
                TextPrimitive::new(
                    label.text.clone(),
                    label.x,
                    label_y,
                    layout.category_font_px,
                    self.category_label_color,
                    TextHAlign::Center,
                )
            };
            frame.texts.push(text);
        }

        frame.validate()?;
        Ok(frame)
    }
}

fn resolve_color(input: &str, fallback: Color) -> Color {
    match Color::from_hex(input) {
        Ok(color) => color,
        Err(err) => {
            warn!(color = input, error = %err, "unusable band color; using fallback");
            fallback
        }
    }
}

fn resolve_axis_color(input: &str, default: Color) -> Color {
    if input.is_empty() {
        return default;
    }
    resolve_color(input, default)
}
