mod chart;
mod layout;
mod render_context;
mod style;
mod text_metrics;

pub use chart::{ClearReason, UpdateOptions, UpdateOutcome, VarianceChart};
pub use layout::{
    CATEGORY_BAND_PADDING, CATEGORY_OUTER_PADDING, CategoryLabel, ChartLayout, LABEL_HEIGHT_PROBE,
    LabelOrientation, LayoutEngine, MIN_CATEGORY_AXIS_HEIGHT, MIN_VALUE_AXIS_WIDTH,
    MIN_VIEWPORT_HEIGHT, MIN_VIEWPORT_WIDTH, ROTATED_LABEL_ANGLE_DEG, ROTATED_LABEL_DX_EM,
    VALUE_OUTER_PADDING_PX, ValueTick, resolve_label_orientation,
};
pub use render_context::{BandGeometry, HitTarget, RenderContext, TooltipPayload};
pub use style::ChartStyle;
pub use text_metrics::{
    DEFAULT_FONT_FAMILY, EstimatedTextMeasurer, TextMeasurer, TextProperties, point_to_px,
};
