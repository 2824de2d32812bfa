//! Nested-range chart model assembled from sparse role-tagged measures.

mod binding;
mod builder;
mod format;
mod settings;

pub use binding::MeasureBinding;
pub use builder::build_model;
pub use format::{DisplayUnit, ValueFormatter};
pub use settings::{
    CategoryAxisSettings, ColorSettings, ObjectInstance, Settings, ValueAxisSettings,
    precision_digits,
};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::data::{ColumnMetadata, MeasureRole};
use crate::interaction::SelectionKey;

/// Host-side services the model builder depends on.
pub trait HostServices {
    /// Palette color for a slot whose configured color is unset.
    fn default_color(&self, slot: &str) -> String;
}

/// Fixed-color palette for headless hosts and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPalette {
    pub color: String,
}

impl Default for StaticPalette {
    fn default() -> Self {
        Self {
            color: "#01B8AA".to_owned(),
        }
    }
}

impl HostServices for StaticPalette {
    fn default_color(&self, _slot: &str) -> String {
        self.color.clone()
    }
}

/// One of the five nested sub-bands, outer-lower to outer-upper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    Lower,
    LowerCore,
    Central,
    UpperCore,
    Upper,
}

impl Band {
    /// Adjacency table: each band spans two neighbouring numeric roles.
    pub const ALL: [Band; 5] = [
        Band::Lower,
        Band::LowerCore,
        Band::Central,
        Band::UpperCore,
        Band::Upper,
    ];

    /// `(lower endpoint, upper endpoint)` roles.
    #[must_use]
    pub const fn endpoints(self) -> (MeasureRole, MeasureRole) {
        match self {
            Band::Lower => (MeasureRole::LowerLimit, MeasureRole::LowerCore),
            Band::LowerCore => (MeasureRole::LowerCore, MeasureRole::LowerCentral),
            Band::Central => (MeasureRole::LowerCentral, MeasureRole::UpperCentral),
            Band::UpperCore => (MeasureRole::UpperCentral, MeasureRole::UpperCore),
            Band::Upper => (MeasureRole::UpperCore, MeasureRole::UpperLimit),
        }
    }
}

/// Ordered label / formatted value pair shown in tooltips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipField {
    pub label: String,
    pub value: String,
}

impl TooltipField {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One nested band of a category.
///
/// `min_value <= max_value` is expected but not enforced; see `is_inverted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub band: Band,
    pub min_value: f64,
    pub max_value: f64,
    pub color: String,
    pub tooltip_fields: Vec<TooltipField>,
}

impl Range {
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.min_value > self.max_value
    }
}

/// One category row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub category_label: String,
    pub ranges: SmallVec<[Range; 5]>,
    pub selection_key: SelectionKey,
    pub is_selected: bool,
    pub tooltip_fields: Vec<TooltipField>,
}

/// Whole-chart snapshot produced by `build_model`.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub min_y: f64,
    pub max_y: f64,
    pub data_points: Vec<DataPoint>,
    pub category_metadata: ColumnMetadata,
    pub value_metadata: ColumnMetadata,
    pub value_formatter: ValueFormatter,
    pub category_formatter: ValueFormatter,
    pub settings: Settings,
}

impl Model {
    #[must_use]
    pub fn selection_keys(&self) -> Vec<SelectionKey> {
        self.data_points
            .iter()
            .map(|point| point.selection_key.clone())
            .collect()
    }
}
