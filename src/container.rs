//! 용기 형태와 바닥 면적 계산.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::quantity::{ensure_non_negative, QuantityError};

/// 원형 접시 면적 [mm²] = π·d²/4
pub fn area_of_plate(diameter_mm: f64) -> Result<f64, QuantityError> {
    let d = ensure_non_negative("diameter", diameter_mm)?;
    Ok(PI * d * d / 4.0)
}

/// 사각 도시락통 면적 [mm²] = 가로 × 세로
pub fn area_of_bento_box(width_mm: f64, length_mm: f64) -> Result<f64, QuantityError> {
    let w = ensure_non_negative("width", width_mm)?;
    let l = ensure_non_negative("length", length_mm)?;
    Ok(w * l)
}

/// 피를 찌는 용기. 치수는 모두 mm 기준이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ContainerShape {
    Plate { diameter_mm: f64 },
    BentoBox { width_mm: f64, length_mm: f64 },
}

impl ContainerShape {
    pub fn area_mm2(&self) -> Result<f64, QuantityError> {
        match *self {
            ContainerShape::Plate { diameter_mm } => area_of_plate(diameter_mm),
            ContainerShape::BentoBox {
                width_mm,
                length_mm,
            } => area_of_bento_box(width_mm, length_mm),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContainerShape::Plate { .. } => "Plate",
            ContainerShape::BentoBox { .. } => "Bento Box",
        }
    }
}

/// 자주 쓰는 용기 크기.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerPreset {
    /// CLI에서 쓰는 식별자
    pub slug: &'static str,
    pub name: &'static str,
    /// 사람이 읽는 치수 표기
    pub size: &'static str,
    pub shape: ContainerShape,
}

pub static PRESETS: [ContainerPreset; 4] = [
    ContainerPreset {
        slug: "small-plate",
        name: "Small Plate",
        size: "6in. diameter",
        shape: ContainerShape::Plate { diameter_mm: 152.4 },
    },
    ContainerPreset {
        slug: "large-plate",
        name: "Large Plate",
        size: "8in. diameter",
        shape: ContainerShape::Plate { diameter_mm: 203.2 },
    },
    ContainerPreset {
        slug: "small-bento",
        name: "Small Bento Box",
        size: "9cm x 15cm",
        shape: ContainerShape::BentoBox {
            width_mm: 90.0,
            length_mm: 150.0,
        },
    },
    ContainerPreset {
        slug: "large-bento",
        name: "Large Bento Box",
        size: "12.5cm x 18.5cm",
        shape: ContainerShape::BentoBox {
            width_mm: 125.0,
            length_mm: 185.0,
        },
    },
];

/// slug 또는 이름(대소문자 무시)으로 프리셋을 찾는다.
pub fn find_preset(key: &str) -> Option<&'static ContainerPreset> {
    let key = key.trim();
    PRESETS
        .iter()
        .find(|p| p.slug.eq_ignore_ascii_case(key) || p.name.eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_lookup_by_slug_and_name() {
        assert_eq!(find_preset("small-plate").map(|p| p.name), Some("Small Plate"));
        assert_eq!(find_preset("large bento box").map(|p| p.slug), Some("large-bento"));
        assert!(find_preset("wok").is_none());
    }

    #[test]
    fn shape_area_dispatches_to_formula() {
        let plate = ContainerShape::Plate { diameter_mm: 2.0 };
        assert!((plate.area_mm2().unwrap() - PI).abs() < 1e-12);
        let bento = ContainerShape::BentoBox {
            width_mm: 90.0,
            length_mm: 150.0,
        };
        assert_eq!(bento.area_mm2().unwrap(), 13_500.0);
    }
}
