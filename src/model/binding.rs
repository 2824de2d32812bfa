use crate::data::{CellValue, ColumnMetadata, DataTable, MeasureRole};

use super::ValueFormatter;

/// Resolution of one numeric role against the host table.
///
/// `Absent` is not an error: it means every band touching the role is
/// omitted.
#[derive(Debug, Clone)]
pub enum MeasureBinding<'a> {
    Present {
        index: usize,
        values: &'a [CellValue],
        metadata: &'a ColumnMetadata,
        formatter: ValueFormatter,
    },
    Absent,
}

impl<'a> MeasureBinding<'a> {
    #[must_use]
    pub fn resolve(table: &'a DataTable, role: MeasureRole) -> Self {
        if !table.has_role(role) {
            return MeasureBinding::Absent;
        }
        let Some(index) = table.value_index_for_role(role) else {
            return MeasureBinding::Absent;
        };
        let column = &table.values[index];
        MeasureBinding::Present {
            index,
            values: &column.values,
            metadata: &column.source,
            formatter: ValueFormatter::from_format(column.source.format.as_deref()),
        }
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, MeasureBinding::Present { .. })
    }

    /// Finite numeric value at `category_index`; non-numeric cells count as absent.
    #[must_use]
    pub fn value_at(&self, category_index: usize) -> Option<f64> {
        match self {
            MeasureBinding::Present { values, .. } => values
                .get(category_index)
                .and_then(CellValue::as_finite_number),
            MeasureBinding::Absent => None,
        }
    }

    #[must_use]
    pub fn metadata(&self) -> Option<&'a ColumnMetadata> {
        match self {
            MeasureBinding::Present { metadata, .. } => Some(*metadata),
            MeasureBinding::Absent => None,
        }
    }

    #[must_use]
    pub fn formatter(&self) -> Option<&ValueFormatter> {
        match self {
            MeasureBinding::Present { formatter, .. } => Some(formatter),
            MeasureBinding::Absent => None,
        }
    }
}
