use approx::assert_relative_eq;
use variance_band::core::{CategoryBandScale, LinearScale, recommended_value_tick_count, tick_step};

#[test]
fn value_scale_maps_domain_onto_inverted_pixel_range() {
    let scale = LinearScale::new(10.0, 25.0, 240.0, 20.0).expect("valid scale");

    assert_relative_eq!(scale.value_to_pixel(10.0), 240.0);
    assert_relative_eq!(scale.value_to_pixel(25.0), 20.0);
    assert_relative_eq!(scale.value_to_pixel(17.5), 130.0, epsilon = 1e-9);
}

#[test]
fn value_scale_rejects_unusable_domains() {
    assert!(LinearScale::new(5.0, 5.0, 0.0, 100.0).is_err());
    assert!(LinearScale::new(10.0, 0.0, 0.0, 100.0).is_err());
    assert!(LinearScale::new(f64::NAN, 1.0, 0.0, 100.0).is_err());
    assert!(LinearScale::new(0.0, 1.0, 0.0, f64::INFINITY).is_err());
}

#[test]
fn ticks_are_round_multiples_inside_the_domain() {
    let scale = LinearScale::new(10.0, 25.0, 200.0, 0.0).expect("valid scale");
    assert_eq!(
        scale.ticks(5),
        vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0]
    );

    let negative = LinearScale::new(-3.0, 3.0, 200.0, 0.0).expect("valid scale");
    let ticks = negative.ticks(3);
    assert_eq!(ticks, vec![-2.0, 0.0, 2.0]);
    assert!(ticks[1].is_sign_positive());
}

#[test]
fn tick_count_grows_with_available_height() {
    assert_eq!(recommended_value_tick_count(120.0), 3);
    assert_eq!(recommended_value_tick_count(150.0), 5);
    assert_eq!(recommended_value_tick_count(299.0), 5);
    assert_eq!(recommended_value_tick_count(300.0), 8);
    assert_relative_eq!(tick_step(0.0, 1_000.0, 8), 100.0);
}

#[test]
fn band_scale_follows_range_bands_spacing() {
    // step = 100 / (2 - 0.1 + 1) = 34.48..., band = step * 0.9
    let scale = CategoryBandScale::new(2, 0.0, 100.0, 0.1, 0.5).expect("valid scale");
    let step = 100.0 / 2.9;

    assert_relative_eq!(scale.slot_width(), step, epsilon = 1e-9);
    assert_relative_eq!(scale.band_width(), step * 0.9, epsilon = 1e-9);
    assert_relative_eq!(scale.band_start(0).expect("first"), step * 0.5, epsilon = 1e-9);
    assert_relative_eq!(scale.band_start(1).expect("second"), step * 1.5, epsilon = 1e-9);
    assert!(scale.band_start(2).is_none());
}

#[test]
fn band_hit_lookup_ignores_gaps_and_outer_padding() {
    let scale = CategoryBandScale::new(2, 0.0, 100.0, 0.1, 0.5).expect("valid scale");
    let start = scale.band_start(1).expect("second");

    assert_eq!(scale.index_at(1.0), None);
    assert_eq!(scale.index_at(scale.band_center(0).expect("center")), Some(0));
    assert_eq!(scale.index_at(start + 0.1), Some(1));
    assert_eq!(scale.index_at(start - 0.5), None, "inter-band gap");
    assert_eq!(scale.index_at(99.9), None);
}

#[test]
fn band_scale_rejects_empty_or_degenerate_input() {
    assert!(CategoryBandScale::new(0, 0.0, 100.0, 0.1, 0.5).is_err());
    assert!(CategoryBandScale::new(3, 100.0, 0.0, 0.1, 0.5).is_err());
    assert!(CategoryBandScale::new(3, 0.0, 100.0, 1.0, 0.5).is_err());
}
