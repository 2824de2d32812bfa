//! Host input boundary: a categorical table whose columns carry role tags.

use serde::{Deserialize, Serialize};

/// Semantic slot a host column can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasureRole {
    Category,
    UpperLimit,
    UpperCore,
    UpperCentral,
    LowerCentral,
    LowerCore,
    LowerLimit,
}

impl MeasureRole {
    /// Numeric roles from the outer-lower bound to the outer-upper bound.
    pub const NUMERIC_ORDER: [MeasureRole; 6] = [
        MeasureRole::LowerLimit,
        MeasureRole::LowerCore,
        MeasureRole::LowerCentral,
        MeasureRole::UpperCentral,
        MeasureRole::UpperCore,
        MeasureRole::UpperLimit,
    ];

    /// Host-facing role identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MeasureRole::Category => "category",
            MeasureRole::UpperLimit => "upperLimit",
            MeasureRole::UpperCore => "upperCore",
            MeasureRole::UpperCentral => "upperCentral",
            MeasureRole::LowerCentral => "lowerCentral",
            MeasureRole::LowerCore => "lowerCore",
            MeasureRole::LowerLimit => "lowerLimit",
        }
    }
}

/// Column description shared by category and value columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    pub display_name: String,
    #[serde(default)]
    pub query_name: String,
    #[serde(default)]
    pub roles: Vec<MeasureRole>,
    #[serde(default)]
    pub format: Option<String>,
}

impl ColumnMetadata {
    #[must_use]
    pub fn new(display_name: impl Into<String>, role: MeasureRole) -> Self {
        let display_name = display_name.into();
        Self {
            query_name: display_name.clone(),
            display_name,
            roles: vec![role],
            format: None,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn has_role(&self, role: MeasureRole) -> bool {
        self.roles.contains(&role)
    }
}

/// One raw table cell as delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl CellValue {
    /// Finite numeric content, `None` for everything else.
    #[must_use]
    pub fn as_finite_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_owned())
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CellValue::Null, CellValue::Number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryColumn {
    pub source: ColumnMetadata,
    pub values: Vec<CellValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueColumn {
    pub source: ColumnMetadata,
    pub values: Vec<CellValue>,
}

/// Categorical payload: metadata columns, category columns and value columns
/// aligned by index, plus the persisted settings objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DataTable {
    #[serde(default)]
    pub metadata: Vec<ColumnMetadata>,
    #[serde(default)]
    pub categories: Vec<CategoryColumn>,
    #[serde(default)]
    pub values: Vec<ValueColumn>,
    #[serde(default)]
    pub objects: serde_json::Value,
}

impl DataTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the category column and registers its metadata.
    #[must_use]
    pub fn with_categories<V: Into<CellValue>>(
        mut self,
        source: ColumnMetadata,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.metadata.push(source.clone());
        self.categories.push(CategoryColumn {
            source,
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Adds a value column and registers its metadata.
    #[must_use]
    pub fn with_values<V: Into<CellValue>>(
        mut self,
        source: ColumnMetadata,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.metadata.push(source.clone());
        self.values.push(ValueColumn {
            source,
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    #[must_use]
    pub fn with_objects(mut self, objects: serde_json::Value) -> Self {
        self.objects = objects;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories
            .first()
            .is_none_or(|category| category.values.is_empty())
    }

    #[must_use]
    pub fn has_role(&self, role: MeasureRole) -> bool {
        self.metadata.iter().any(|column| column.has_role(role))
    }

    #[must_use]
    pub fn metadata_for_role(&self, role: MeasureRole) -> Option<&ColumnMetadata> {
        self.metadata.iter().find(|column| column.has_role(role))
    }

    /// Position of the first value column bound to `role`.
    #[must_use]
    pub fn value_index_for_role(&self, role: MeasureRole) -> Option<usize> {
        self.values
            .iter()
            .position(|column| column.source.has_role(role))
    }
}
