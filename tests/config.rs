//! 설정 파일 로드 테스트.
use std::fs;

use rice_noodle_roll_calculator::config::{self, Config, ConfigError};
use rice_noodle_roll_calculator::conversion::ConversionEngine;
use rice_noodle_roll_calculator::units::{LengthUnit, MassUnit, VolumeUnit};

#[test]
fn loads_tables_from_toml_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[display]
volume = "cup"
mass = "oz"

[tables]
starch_density = 0.6

[[tables.volume]]
unit = "mL"
factor = 1.0

[[tables.volume]]
unit = "tsp"
factor = 5.0

[[tables.volume]]
unit = "tbsp"
factor = 15.0

[[tables.volume]]
unit = "cup"
factor = 240.0

[[tables.volume]]
unit = "mm3"
factor = 0.001
"#,
    )
    .expect("write config");

    let cfg = config::load_from_path(&path).expect("valid config");
    assert_eq!(cfg.display.volume, VolumeUnit::Cup);
    assert_eq!(cfg.display.mass, MassUnit::Ounce);
    assert_eq!(cfg.display.diameter, LengthUnit::Inch);
    assert!((cfg.tables.starch_density.g_per_ml() - 0.6).abs() < 1e-12);

    let engine = ConversionEngine::new(cfg.tables);
    let ml = engine.convert(1.0, VolumeUnit::Cup, VolumeUnit::Milliliter);
    assert!((ml - 240.0).abs() < 1e-12);
    let mm = engine.convert(1.0, LengthUnit::Inch, LengthUnit::Millimeter);
    assert!((mm - 25.4).abs() < 1e-12);
}

#[test]
fn empty_file_is_default_config() {
    let cfg = Config::from_toml_str("").expect("empty config");
    assert_eq!(cfg, Config::default());
}

#[test]
fn incomplete_scale_table_is_rejected() {
    let err = Config::from_toml_str(
        r#"
[[tables.mass]]
unit = "g"
factor = 1.0
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{err}");
}

#[test]
fn non_positive_factor_is_rejected() {
    let err = Config::from_toml_str(
        r#"
[[tables.mass]]
unit = "g"
factor = 1.0

[[tables.mass]]
unit = "oz"
factor = 0.0
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{err}");
}

#[test]
fn default_config_survives_toml_round_trip() {
    let text = Config::default().to_toml_string().expect("serialize");
    let back = Config::from_toml_str(&text).expect("parse");
    assert_eq!(back, Config::default());
}

#[test]
fn explicit_missing_path_is_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nope.toml");
    let err = config::load_or_default(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(p) if p == path));
}
