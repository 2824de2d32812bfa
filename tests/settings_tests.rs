use serde_json::json;
use variance_band::model::{Settings, precision_digits};

#[test]
fn missing_objects_use_defaults() {
    let settings = Settings::parse(&serde_json::Value::Null);
    assert_eq!(settings, Settings::default());
    assert!(settings.category_axis.show);
    assert!(settings.value_axis.show);
    assert_eq!(settings.value_axis.min_value, None);
    assert_eq!(settings.value_axis.precision, 2.0);
    assert_eq!(settings.colors.central_color, "");
}

#[test]
fn partial_objects_keep_defaults_for_unset_fields() {
    let settings = Settings::parse(&json!({
        "colors": { "upperColor": "#abcdef" },
        "valueAxis": { "maxValue": 100, "fontSize": 9 }
    }));

    assert_eq!(settings.colors.upper_color, "#abcdef");
    assert_eq!(settings.colors.lower_color, "");
    assert_eq!(settings.value_axis.max_value, Some(100.0));
    assert_eq!(settings.value_axis.font_size, 9.0);
    assert!(settings.value_axis.show);
    assert_eq!(settings.category_axis.font_size, 12.0);
}

#[test]
fn malformed_objects_fall_back_to_defaults() {
    let settings = Settings::parse(&json!({ "valueAxis": { "show": "sometimes" } }));
    assert_eq!(settings, Settings::default());
}

#[test]
fn out_of_range_numbers_are_sanitized() {
    let settings = Settings::parse(&json!({
        "categoryAxis": { "precision": -3, "fontSize": 0, "displayUnits": -1 },
        "valueAxis": { "precision": 40.7 }
    }));

    assert_eq!(settings.category_axis.precision, 2.0);
    assert_eq!(settings.category_axis.font_size, 12.0);
    assert_eq!(settings.category_axis.display_units, 0.0);
    assert_eq!(settings.value_axis.precision, 15.0);
    assert_eq!(precision_digits(settings.value_axis.precision), 15);
}

#[test]
fn enumeration_preserves_declared_property_order() {
    let settings = Settings::default();
    let instance = settings
        .enumerate_object_instances("colors")
        .expect("enumerate")
        .expect("known object");

    assert_eq!(instance.object_name, "colors");
    let names: Vec<&str> = instance.properties.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "upperColor",
            "upperCoreColor",
            "centralColor",
            "lowerCoreColor",
            "lowerColor"
        ]
    );
}

#[test]
fn every_declared_object_enumerates() {
    let settings = Settings::default();
    for name in Settings::OBJECT_NAMES {
        let instance = settings
            .enumerate_object_instances(name)
            .expect("enumerate")
            .expect("known object");
        assert!(!instance.properties.is_empty(), "{name} has properties");
    }
    assert!(settings
        .enumerate_object_instances("unknown")
        .expect("enumerate")
        .is_none());
}

#[test]
fn value_axis_enumeration_includes_bound_overrides() {
    let settings = Settings::parse(&json!({ "valueAxis": { "minValue": 5 } }));
    let instance = settings
        .enumerate_object_instances("valueAxis")
        .expect("enumerate")
        .expect("known object");

    assert_eq!(instance.properties["minValue"], json!(5.0));
    assert_eq!(instance.properties["maxValue"], serde_json::Value::Null);
    assert_eq!(instance.properties.get_index(0).map(|(key, _)| key.as_str()), Some("show"));
}
