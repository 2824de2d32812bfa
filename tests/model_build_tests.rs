use serde_json::json;
use variance_band::data::{CellValue, ColumnMetadata, DataTable, MeasureRole};
use variance_band::model::{Band, StaticPalette, TooltipField, build_model};

fn two_day_table() -> DataTable {
    DataTable::new()
        .with_categories(
            ColumnMetadata::new("Day", MeasureRole::Category),
            ["Mon", "Tue"],
        )
        .with_values(
            ColumnMetadata::new("Lower central", MeasureRole::LowerCentral),
            [10.0, 20.0],
        )
        .with_values(
            ColumnMetadata::new("Upper central", MeasureRole::UpperCentral),
            [15.0, 25.0],
        )
}

fn full_table() -> DataTable {
    DataTable::new()
        .with_categories(ColumnMetadata::new("Task", MeasureRole::Category), ["A"])
        .with_values(
            ColumnMetadata::new("Upper limit", MeasureRole::UpperLimit),
            [60.0],
        )
        .with_values(
            ColumnMetadata::new("Lower limit", MeasureRole::LowerLimit),
            [0.0],
        )
        .with_values(
            ColumnMetadata::new("Upper core", MeasureRole::UpperCore),
            [50.0],
        )
        .with_values(
            ColumnMetadata::new("Lower core", MeasureRole::LowerCore),
            [10.0],
        )
        .with_values(
            ColumnMetadata::new("Upper central", MeasureRole::UpperCentral),
            [40.0],
        )
        .with_values(
            ColumnMetadata::new("Lower central", MeasureRole::LowerCentral),
            [20.0],
        )
}

#[test]
fn central_only_payload_yields_one_range_per_category() {
    let model = build_model(Some(&two_day_table()), &StaticPalette::default()).expect("model");

    assert_eq!(model.data_points.len(), 2);
    assert_eq!(model.min_y, 10.0);
    assert_eq!(model.max_y, 25.0);

    let mon = &model.data_points[0];
    assert_eq!(mon.category_label, "Mon");
    assert_eq!(mon.ranges.len(), 1);
    assert_eq!(mon.ranges[0].band, Band::Central);
    assert_eq!((mon.ranges[0].min_value, mon.ranges[0].max_value), (10.0, 15.0));

    let tue = &model.data_points[1];
    assert_eq!(tue.ranges.len(), 1);
    assert_eq!((tue.ranges[0].min_value, tue.ranges[0].max_value), (20.0, 25.0));
    assert!(model.data_points.iter().all(|point| !point.is_selected));
}

#[test]
fn missing_central_role_produces_no_model() {
    let table = DataTable::new()
        .with_categories(
            ColumnMetadata::new("Day", MeasureRole::Category),
            ["Mon", "Tue"],
        )
        .with_values(
            ColumnMetadata::new("Lower central", MeasureRole::LowerCentral),
            [10.0, 20.0],
        );
    assert!(build_model(Some(&table), &StaticPalette::default()).is_none());
}

#[test]
fn missing_payload_or_category_produces_no_model() {
    let palette = StaticPalette::default();
    assert!(build_model(None, &palette).is_none());
    assert!(build_model(Some(&DataTable::new()), &palette).is_none());

    let no_category = DataTable::new()
        .with_values(
            ColumnMetadata::new("Lower central", MeasureRole::LowerCentral),
            [10.0],
        )
        .with_values(
            ColumnMetadata::new("Upper central", MeasureRole::UpperCentral),
            [15.0],
        );
    assert!(build_model(Some(&no_category), &palette).is_none());
}

#[test]
fn all_six_roles_emit_five_bands_in_nesting_order() {
    let model = build_model(Some(&full_table()), &StaticPalette::default()).expect("model");
    let point = &model.data_points[0];

    let bands: Vec<Band> = point.ranges.iter().map(|range| range.band).collect();
    assert_eq!(bands, Band::ALL.to_vec());

    let spans: Vec<(f64, f64)> = point
        .ranges
        .iter()
        .map(|range| (range.min_value, range.max_value))
        .collect();
    assert_eq!(
        spans,
        vec![(0.0, 10.0), (10.0, 20.0), (20.0, 40.0), (40.0, 50.0), (50.0, 60.0)]
    );
    assert_eq!((model.min_y, model.max_y), (0.0, 60.0));
}

#[test]
fn absent_role_drops_only_adjacent_bands() {
    let table = DataTable::new()
        .with_categories(ColumnMetadata::new("Task", MeasureRole::Category), ["A"])
        .with_values(
            ColumnMetadata::new("Lower limit", MeasureRole::LowerLimit),
            [0.0],
        )
        .with_values(
            ColumnMetadata::new("Lower central", MeasureRole::LowerCentral),
            [20.0],
        )
        .with_values(
            ColumnMetadata::new("Upper central", MeasureRole::UpperCentral),
            [40.0],
        )
        .with_values(
            ColumnMetadata::new("Upper core", MeasureRole::UpperCore),
            [50.0],
        );
    let model = build_model(Some(&table), &StaticPalette::default()).expect("model");

    let bands: Vec<Band> = model.data_points[0]
        .ranges
        .iter()
        .map(|range| range.band)
        .collect();
    assert_eq!(bands, vec![Band::Central, Band::UpperCore]);
    // The lower limit still widens the domain without forming a band.
    assert_eq!(model.min_y, 0.0);
}

#[test]
fn min_override_below_accumulated_max_replaces_min() {
    let table = two_day_table().with_objects(json!({ "valueAxis": { "minValue": 5 } }));
    let model = build_model(Some(&table), &StaticPalette::default()).expect("model");
    assert_eq!(model.min_y, 5.0);
    assert_eq!(model.max_y, 25.0);
}

#[test]
fn overrides_that_cross_the_opposite_bound_are_ignored() {
    let table = two_day_table()
        .with_objects(json!({ "valueAxis": { "minValue": 30, "maxValue": 5 } }));
    let model = build_model(Some(&table), &StaticPalette::default()).expect("model");
    assert_eq!((model.min_y, model.max_y), (10.0, 25.0));

    let widened = two_day_table()
        .with_objects(json!({ "valueAxis": { "minValue": 0, "maxValue": 100 } }));
    let model = build_model(Some(&widened), &StaticPalette::default()).expect("model");
    assert_eq!((model.min_y, model.max_y), (0.0, 100.0));
}

#[test]
fn non_numeric_cell_counts_as_absent_for_that_category() {
    let table = DataTable::new()
        .with_categories(
            ColumnMetadata::new("Day", MeasureRole::Category),
            ["Mon", "Tue"],
        )
        .with_values(
            ColumnMetadata::new("Lower central", MeasureRole::LowerCentral),
            [CellValue::Number(10.0), CellValue::from("n/a")],
        )
        .with_values(
            ColumnMetadata::new("Upper central", MeasureRole::UpperCentral),
            [15.0, 25.0],
        );
    let model = build_model(Some(&table), &StaticPalette::default()).expect("model");

    assert_eq!(model.data_points[0].ranges.len(), 1);
    assert!(model.data_points[1].ranges.is_empty());
    assert_eq!((model.min_y, model.max_y), (10.0, 25.0));
}

#[test]
fn payload_without_any_numeric_value_produces_no_model() {
    let table = DataTable::new()
        .with_categories(ColumnMetadata::new("Day", MeasureRole::Category), ["Mon"])
        .with_values(
            ColumnMetadata::new("Lower central", MeasureRole::LowerCentral),
            [None::<f64>],
        )
        .with_values(
            ColumnMetadata::new("Upper central", MeasureRole::UpperCentral),
            [None::<f64>],
        );
    assert!(build_model(Some(&table), &StaticPalette::default()).is_none());
}

#[test]
fn inverted_endpoints_are_preserved_in_the_model() {
    let table = DataTable::new()
        .with_categories(ColumnMetadata::new("Day", MeasureRole::Category), ["Mon"])
        .with_values(
            ColumnMetadata::new("Lower central", MeasureRole::LowerCentral),
            [30.0],
        )
        .with_values(
            ColumnMetadata::new("Upper central", MeasureRole::UpperCentral),
            [15.0],
        );
    let model = build_model(Some(&table), &StaticPalette::default()).expect("model");
    let range = &model.data_points[0].ranges[0];

    assert_eq!((range.min_value, range.max_value), (30.0, 15.0));
    assert!(range.is_inverted());
    assert_eq!((model.min_y, model.max_y), (15.0, 30.0));
}

#[test]
fn unset_band_color_falls_back_to_host_palette() {
    let palette = StaticPalette {
        color: "#123456".to_owned(),
    };
    let table = full_table().with_objects(json!({ "colors": { "centralColor": "#ff0000" } }));
    let model = build_model(Some(&table), &palette).expect("model");

    for range in &model.data_points[0].ranges {
        let expected = if range.band == Band::Central {
            "#ff0000"
        } else {
            "#123456"
        };
        assert_eq!(range.color, expected, "band {:?}", range.band);
    }
}

#[test]
fn tooltip_lists_category_then_present_measures_lower_to_upper() {
    let model = build_model(Some(&two_day_table()), &StaticPalette::default()).expect("model");
    let mon = &model.data_points[0];

    let expected = vec![
        TooltipField::new("Day", "Mon"),
        TooltipField::new("Lower central", "10"),
        TooltipField::new("Upper central", "15"),
    ];
    assert_eq!(mon.tooltip_fields, expected);
    assert_eq!(mon.ranges[0].tooltip_fields, expected);
}

#[test]
fn tooltip_values_use_each_column_format() {
    let table = DataTable::new()
        .with_categories(ColumnMetadata::new("Day", MeasureRole::Category), ["Mon"])
        .with_values(
            ColumnMetadata::new("Lower central", MeasureRole::LowerCentral).with_format("0.0"),
            [10.0],
        )
        .with_values(
            ColumnMetadata::new("Upper central", MeasureRole::UpperCentral)
                .with_format("$#,0.00"),
            [1500.0],
        );
    let model = build_model(Some(&table), &StaticPalette::default()).expect("model");
    let fields = &model.data_points[0].tooltip_fields;

    assert_eq!(fields[1].value, "10.0");
    assert_eq!(fields[2].value, "$1,500.00");
}

#[test]
fn numeric_category_tooltip_ignores_axis_precision() {
    let table = DataTable::new()
        .with_categories(ColumnMetadata::new("Year", MeasureRole::Category), [2024.0])
        .with_values(
            ColumnMetadata::new("Lower central", MeasureRole::LowerCentral),
            [10.0],
        )
        .with_values(
            ColumnMetadata::new("Upper central", MeasureRole::UpperCentral),
            [15.0],
        );
    let model = build_model(Some(&table), &StaticPalette::default()).expect("model");
    let point = &model.data_points[0];

    assert_eq!(point.category_label, "2024.00");
    assert_eq!(point.tooltip_fields[0], TooltipField::new("Year", "2024"));
    assert_eq!(point.ranges[0].tooltip_fields[0].value, "2024");
}

#[test]
fn rebuilding_the_same_payload_is_idempotent() {
    let table = full_table().with_objects(json!({ "valueAxis": { "displayUnits": 1000 } }));
    let palette = StaticPalette::default();
    let first = build_model(Some(&table), &palette).expect("model");
    let second = build_model(Some(&table), &palette).expect("model");

    assert_eq!(first, second);
    assert_eq!(first.selection_keys(), second.selection_keys());
}

#[test]
fn selection_keys_distinguish_repeated_labels() {
    let table = DataTable::new()
        .with_categories(
            ColumnMetadata::new("Day", MeasureRole::Category),
            ["Mon", "Mon"],
        )
        .with_values(
            ColumnMetadata::new("Lower central", MeasureRole::LowerCentral),
            [1.0, 2.0],
        )
        .with_values(
            ColumnMetadata::new("Upper central", MeasureRole::UpperCentral),
            [3.0, 4.0],
        );
    let model = build_model(Some(&table), &StaticPalette::default()).expect("model");
    let keys = model.selection_keys();
    assert_ne!(keys[0], keys[1]);
}
