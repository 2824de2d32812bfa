use smallvec::SmallVec;
use tracing::debug;

use crate::data::{DataTable, MeasureRole};
use crate::interaction::SelectionKey;

use super::{
    Band, DataPoint, HostServices, MeasureBinding, Model, Range, Settings, TooltipField,
    ValueFormatter, precision_digits,
};

const DEFAULT_COLOR_SLOT: &str = "bar";

/// Running min/max over every resolved numeric value.
#[derive(Debug, Clone, Copy)]
struct DomainAccumulator {
    min: f64,
    max: f64,
    count: usize,
}

impl DomainAccumulator {
    fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            count: 0,
        }
    }

    fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.count += 1;
    }

    fn bounds(self) -> Option<(f64, f64)> {
        (self.count > 0).then_some((self.min, self.max))
    }
}

fn numeric_slot(role: MeasureRole) -> usize {
    MeasureRole::NUMERIC_ORDER
        .iter()
        .position(|candidate| *candidate == role)
        .unwrap_or_default()
}

/// Builds the chart model, or `None` when the payload cannot form a chart.
///
/// Requires a non-empty payload, a category column and both central roles.
/// A payload in which no numeric value resolves is treated the same way.
#[must_use]
pub fn build_model(table: Option<&DataTable>, host: &dyn HostServices) -> Option<Model> {
    let Some(table) = table else {
        debug!("no data payload");
        return None;
    };
    if table.is_empty() {
        debug!("data payload has no category values");
        return None;
    }
    let Some(category_metadata) = table.metadata_for_role(MeasureRole::Category) else {
        debug!("no column is bound to the category role");
        return None;
    };
    let (Some(value_metadata), true) = (
        table.metadata_for_role(MeasureRole::UpperCentral),
        table.has_role(MeasureRole::LowerCentral),
    ) else {
        debug!("upper and lower central roles are both required");
        return None;
    };
    let category = table.categories.first()?;

    let settings = Settings::parse(&table.objects);
    let bindings = MeasureRole::NUMERIC_ORDER.map(|role| MeasureBinding::resolve(table, role));
    let default_color = host.default_color(DEFAULT_COLOR_SLOT);
    let label_formatter = ValueFormatter::for_axis(
        category.source.format.as_deref(),
        settings.category_axis.display_units,
        precision_digits(settings.category_axis.precision),
        0.0,
    );
    let tooltip_formatter = ValueFormatter::from_format(category.source.format.as_deref());

    let mut domain = DomainAccumulator::new();
    let mut data_points = Vec::with_capacity(category.values.len());
    for (index, cell) in category.values.iter().enumerate() {
        let category_label = label_formatter.format(cell);
        let mut tooltip_fields = vec![TooltipField::new(
            category.source.display_name.clone(),
            tooltip_formatter.format(cell),
        )];

        let mut resolved = [None; 6];
        for (slot, binding) in bindings.iter().enumerate() {
            let MeasureBinding::Present {
                metadata,
                formatter,
                ..
            } = binding
            else {
                continue;
            };
            let Some(value) = binding.value_at(index) else {
                continue;
            };
            domain.include(value);
            tooltip_fields.push(TooltipField::new(
                metadata.display_name.clone(),
                formatter.format_number(value),
            ));
            resolved[slot] = Some(value);
        }

        let mut ranges = SmallVec::new();
        for band in Band::ALL {
            let (lower, upper) = band.endpoints();
            let (Some(min_value), Some(max_value)) =
                (resolved[numeric_slot(lower)], resolved[numeric_slot(upper)])
            else {
                continue;
            };
            let configured = settings.colors.band_color(band);
            let color = if configured.is_empty() {
                default_color.clone()
            } else {
                configured.to_owned()
            };
            ranges.push(Range {
                band,
                min_value,
                max_value,
                color,
                tooltip_fields: tooltip_fields.clone(),
            });
        }

        data_points.push(DataPoint {
            category_label,
            ranges,
            selection_key: SelectionKey::for_category(category.source.query_name.clone(), index),
            is_selected: false,
            tooltip_fields,
        });
    }

    let Some((accumulated_min, accumulated_max)) = domain.bounds() else {
        debug!("no numeric value resolved for any category");
        return None;
    };
    let min_y = match settings.value_axis.min_value {
        Some(min) if min < accumulated_max => min,
        _ => accumulated_min,
    };
    let max_y = match settings.value_axis.max_value {
        Some(max) if max > accumulated_min => max,
        _ => accumulated_max,
    };

    let value_formatter = ValueFormatter::for_axis(
        value_metadata.format.as_deref(),
        settings.value_axis.display_units,
        precision_digits(settings.value_axis.precision),
        min_y.abs().max(max_y.abs()),
    );

    debug!(
        categories = data_points.len(),
        bands = data_points.iter().map(|point| point.ranges.len()).sum::<usize>(),
        min_y,
        max_y,
        "built variance model"
    );

    Some(Model {
        min_y,
        max_y,
        data_points,
        category_metadata: category_metadata.clone(),
        value_metadata: value_metadata.clone(),
        value_formatter,
        category_formatter: label_formatter,
        settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_table_chains_neighbouring_roles() {
        for pair in Band::ALL.windows(2) {
            assert_eq!(pair[0].endpoints().1, pair[1].endpoints().0);
        }
        assert_eq!(Band::ALL[0].endpoints().0, MeasureRole::NUMERIC_ORDER[0]);
        assert_eq!(Band::ALL[4].endpoints().1, MeasureRole::NUMERIC_ORDER[5]);
    }

    #[test]
    fn accumulator_is_empty_until_a_value_is_seen() {
        let mut domain = DomainAccumulator::new();
        assert_eq!(domain.bounds(), None);
        domain.include(3.0);
        domain.include(-1.0);
        assert_eq!(domain.bounds(), Some((-1.0, 3.0)));
    }
}
