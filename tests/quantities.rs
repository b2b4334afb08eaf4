//! 용기 면적과 전분/물 수량 계산 회귀 테스트.
use rice_noodle_roll_calculator::config::DisplayUnits;
use rice_noodle_roll_calculator::container::{find_preset, ContainerShape};
use rice_noodle_roll_calculator::conversion::{round, to_mass, ConversionEngine};
use rice_noodle_roll_calculator::quantity::{
    CookingMethod, Measure, QuantityError, QuantityRequest,
};
use rice_noodle_roll_calculator::report::CalculatorInput;
use rice_noodle_roll_calculator::tables::STARCH_DENSITY;
use rice_noodle_roll_calculator::units::{LengthUnit, MassUnit};

fn steam(area_mm2: f64, thickness_mm: f64) -> QuantityRequest {
    QuantityRequest {
        area_mm2,
        thickness_mm,
        method: CookingMethod::Steam,
    }
}

#[test]
fn plate_and_bento_areas() {
    let engine = ConversionEngine::default();
    let plate = engine.area_of_plate(152.4).expect("plate area");
    assert!((plate - 18241.47).abs() < 0.01, "plate={plate}");
    let bento = engine.area_of_bento_box(125.0, 185.0).expect("bento area");
    assert!((bento - 23125.0).abs() < 1e-9);
}

#[test]
fn six_inch_plate_seven_mm_steam() {
    let engine = ConversionEngine::default();
    let diameter = engine.convert(6.0, LengthUnit::Inch, LengthUnit::Millimeter);
    let area = engine.area_of_plate(diameter).unwrap();
    let q = engine.derive_quantities(&steam(area, 7.0)).expect("steam");

    assert!((q.final_water_volume_ml - 127.69).abs() < 0.01);
    assert!((q.starch_volume_ml - 98.22).abs() < 0.01);
    assert!((q.water_volume_ml - 127.69).abs() < 0.01);

    let starch_g = to_mass(q.starch_volume_ml, STARCH_DENSITY);
    assert!((starch_g - 55.197).abs() < 1e-3, "starch_g={starch_g}");
}

#[test]
fn mass_report_in_ounces() {
    let engine = ConversionEngine::default();
    let input = CalculatorInput {
        container: ContainerShape::Plate { diameter_mm: 152.4 },
        thickness_mm: 7.0,
        method: CookingMethod::Steam,
        measure: Measure::Mass,
    };
    let display = DisplayUnits {
        mass: MassUnit::Ounce,
        ..DisplayUnits::default()
    };
    let report = engine.evaluate(&input, &display).expect("steam");
    assert_eq!(report.starch.unit, "oz");
    assert!((report.starch.value - 1.947).abs() < 1e-9);
}

#[test]
fn microwave_is_not_supported() {
    let engine = ConversionEngine::default();
    let err = engine
        .derive_quantities(&QuantityRequest {
            method: CookingMethod::Microwave,
            ..steam(1000.0, 5.0)
        })
        .unwrap_err();
    assert_eq!(err, QuantityError::UnsupportedMethod(CookingMethod::Microwave));

    let input = CalculatorInput {
        method: CookingMethod::Microwave,
        ..CalculatorInput::default()
    };
    let err = engine.evaluate(&input, &DisplayUnits::default()).unwrap_err();
    assert_eq!(err, QuantityError::UnsupportedMethod(CookingMethod::Microwave));
}

#[test]
fn negative_dimensions_are_rejected() {
    let engine = ConversionEngine::default();
    assert!(matches!(
        engine.area_of_plate(-1.0),
        Err(QuantityError::InvalidInput { .. })
    ));
    assert!(matches!(
        engine.area_of_bento_box(10.0, -2.0),
        Err(QuantityError::InvalidInput { .. })
    ));
    assert!(matches!(
        engine.derive_quantities(&steam(100.0, -0.5)),
        Err(QuantityError::InvalidInput { field: "thickness", .. })
    ));
    assert!(matches!(
        engine.derive_quantities(&steam(f64::NAN, 1.0)),
        Err(QuantityError::InvalidInput { field: "area", .. })
    ));
}

#[test]
fn zero_dimensions_give_zero_quantities() {
    let engine = ConversionEngine::default();
    let q = engine.derive_quantities(&steam(0.0, 7.0)).unwrap();
    assert_eq!(q.final_water_volume_ml, 0.0);
    assert_eq!(q.starch_volume_ml, 0.0);
    assert_eq!(q.water_volume_ml, 0.0);
}

#[test]
fn presets_resolve_by_slug_or_name() {
    let preset = find_preset("large-bento").expect("slug");
    assert_eq!(
        preset.shape,
        ContainerShape::BentoBox {
            width_mm: 125.0,
            length_mm: 185.0,
        }
    );
    assert!(find_preset("SMALL PLATE").is_some());
    assert!(find_preset("wok").is_none());
}

#[test]
fn rounding_is_three_decimals() {
    assert_eq!(round(18241.46924750992), 18241.469);
    assert_eq!(round(98.2233), 98.223);
    assert_eq!(round(0.0005), 0.001);
}
