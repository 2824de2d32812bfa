use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ChartResult;

use super::Band;

const DEFAULT_PRECISION: f64 = 2.0;
const MAX_PRECISION: f64 = 15.0;
const DEFAULT_FONT_SIZE_PT: f64 = 12.0;

fn default_true() -> bool {
    true
}

fn default_precision() -> f64 {
    DEFAULT_PRECISION
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE_PT
}

/// Per-band fill colors. An empty string defers to the host palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorSettings {
    pub upper_color: String,
    pub upper_core_color: String,
    pub central_color: String,
    pub lower_core_color: String,
    pub lower_color: String,
}

impl ColorSettings {
    #[must_use]
    pub fn band_color(&self, band: Band) -> &str {
        match band {
            Band::Lower => &self.lower_color,
            Band::LowerCore => &self.lower_core_color,
            Band::Central => &self.central_color,
            Band::UpperCore => &self.upper_core_color,
            Band::Upper => &self.upper_color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryAxisSettings {
    #[serde(default = "default_true")]
    pub show: bool,
    pub show_axis_title: bool,
    pub display_units: f64,
    #[serde(default = "default_precision")]
    pub precision: f64,
    pub title: String,
    /// Tick label color; empty uses the default axis label color.
    pub color: String,
    /// Tick label font size in points.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
}

impl Default for CategoryAxisSettings {
    fn default() -> Self {
        Self {
            show: true,
            show_axis_title: false,
            display_units: 0.0,
            precision: DEFAULT_PRECISION,
            title: String::new(),
            color: String::new(),
            font_size: DEFAULT_FONT_SIZE_PT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValueAxisSettings {
    #[serde(default = "default_true")]
    pub show: bool,
    pub show_axis_title: bool,
    /// Optional upper bound override for the value domain.
    pub max_value: Option<f64>,
    /// Optional lower bound override for the value domain.
    pub min_value: Option<f64>,
    pub display_units: f64,
    #[serde(default = "default_precision")]
    pub precision: f64,
    pub title: String,
    pub color: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
}

impl Default for ValueAxisSettings {
    fn default() -> Self {
        Self {
            show: true,
            show_axis_title: false,
            max_value: None,
            min_value: None,
            display_units: 0.0,
            precision: DEFAULT_PRECISION,
            title: String::new(),
            color: String::new(),
            font_size: DEFAULT_FONT_SIZE_PT,
        }
    }
}

/// One enumerable settings object handed to the host property editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInstance {
    pub object_name: String,
    pub properties: IndexMap<String, serde_json::Value>,
}

/// User configuration persisted by the host as `objects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub colors: ColorSettings,
    pub category_axis: CategoryAxisSettings,
    pub value_axis: ValueAxisSettings,
}

impl Settings {
    pub const OBJECT_NAMES: [&'static str; 3] = ["colors", "categoryAxis", "valueAxis"];

    /// Parses host objects, falling back to defaults for anything unusable.
    #[must_use]
    pub fn parse(objects: &serde_json::Value) -> Self {
        if objects.is_null() {
            return Self::default();
        }
        match serde_json::from_value::<Settings>(objects.clone()) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                warn!(error = %err, "settings objects could not be parsed; using defaults");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn sanitized(mut self) -> Self {
        sanitize_axis_numbers(
            "categoryAxis",
            &mut self.category_axis.precision,
            &mut self.category_axis.font_size,
            &mut self.category_axis.display_units,
        );
        sanitize_axis_numbers(
            "valueAxis",
            &mut self.value_axis.precision,
            &mut self.value_axis.font_size,
            &mut self.value_axis.display_units,
        );
        for bound in [&mut self.value_axis.min_value, &mut self.value_axis.max_value] {
            if bound.is_some_and(|value| !value.is_finite()) {
                warn!("valueAxis bound override is not finite; ignoring it");
                *bound = None;
            }
        }
        self
    }

    /// Ordered properties of one settings object, `None` for unknown names.
    pub fn enumerate_object_instances(
        &self,
        object_name: &str,
    ) -> ChartResult<Option<ObjectInstance>> {
        // Serializing to text keeps struct field order, unlike `serde_json::Map`.
        let encoded = match object_name {
            "colors" => serde_json::to_string(&self.colors)?,
            "categoryAxis" => serde_json::to_string(&self.category_axis)?,
            "valueAxis" => serde_json::to_string(&self.value_axis)?,
            _ => return Ok(None),
        };
        let properties: IndexMap<String, serde_json::Value> = serde_json::from_str(&encoded)?;
        Ok(Some(ObjectInstance {
            object_name: object_name.to_owned(),
            properties,
        }))
    }
}

fn sanitize_axis_numbers(
    axis: &str,
    precision: &mut f64,
    font_size: &mut f64,
    display_units: &mut f64,
) {
    if !precision.is_finite() || *precision < 0.0 {
        warn!(axis, precision = *precision, "invalid precision; using default");
        *precision = DEFAULT_PRECISION;
    }
    *precision = precision.floor().min(MAX_PRECISION);

    if !font_size.is_finite() || *font_size <= 0.0 {
        warn!(axis, font_size = *font_size, "invalid font size; using default");
        *font_size = DEFAULT_FONT_SIZE_PT;
    }

    if !display_units.is_finite() || *display_units < 0.0 {
        warn!(axis, display_units = *display_units, "invalid display units; using auto");
        *display_units = 0.0;
    }
}

/// Decimal digits an axis formatter should render.
#[must_use]
pub fn precision_digits(precision: f64) -> u32 {
    precision.clamp(0.0, MAX_PRECISION) as u32
}
