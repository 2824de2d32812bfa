//! variance-band: nested-range schedule variance chart engine.
//!
//! Sparse role-tagged measures per category are assembled into up to five
//! nested bands, laid out against a value axis and a category axis, and
//! painted through a pluggable renderer with click-to-select highlighting.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod model;
pub mod render;
pub mod telemetry;

pub use api::{ClearReason, UpdateOptions, UpdateOutcome, VarianceChart};
pub use data::{DataTable, MeasureRole};
pub use error::{ChartError, ChartResult};
pub use model::{Model, build_model};
