use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{normalize_symbol, Dimension, Unit};
use crate::conversion::ConversionError;
use crate::tables::{ConversionTables, ScaleTable};

/// 체적 단위. 내부 기준은 mL이다.
///
/// 계량 스푼/컵은 미국식 근사값을 쓴다. `mm³`는 면적 × 두께를 mL로 바꿀 때 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeUnit {
    #[serde(rename = "mL", alias = "ml")]
    Milliliter,
    #[serde(rename = "tsp")]
    Teaspoon,
    #[serde(rename = "tbsp")]
    Tablespoon,
    #[serde(rename = "cup")]
    Cup,
    #[serde(rename = "mm3", alias = "mm^3", alias = "mm³")]
    CubicMillimeter,
}

impl Unit for VolumeUnit {
    const DIMENSION: Dimension = Dimension::Volume;
    const BASE: Self = VolumeUnit::Milliliter;
    const ALL: &'static [Self] = &[
        VolumeUnit::Milliliter,
        VolumeUnit::Teaspoon,
        VolumeUnit::Tablespoon,
        VolumeUnit::Cup,
        VolumeUnit::CubicMillimeter,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn symbol(self) -> &'static str {
        match self {
            VolumeUnit::Milliliter => "mL",
            VolumeUnit::Teaspoon => "tsp",
            VolumeUnit::Tablespoon => "tbsp",
            VolumeUnit::Cup => "cup",
            VolumeUnit::CubicMillimeter => "mm³",
        }
    }

    fn default_factor(self) -> f64 {
        match self {
            VolumeUnit::Milliliter => 1.0,
            VolumeUnit::Teaspoon => 4.929,
            VolumeUnit::Tablespoon => 14.79,
            VolumeUnit::Cup => 236.6,
            VolumeUnit::CubicMillimeter => 0.001,
        }
    }

    fn scale_table(tables: &ConversionTables) -> &ScaleTable<Self> {
        &tables.volume
    }
}

impl VolumeUnit {
    /// 계량용으로 화면에 노출하는 단위 (mm³ 제외).
    pub const KITCHEN: &'static [VolumeUnit] = &[
        VolumeUnit::Milliliter,
        VolumeUnit::Teaspoon,
        VolumeUnit::Tablespoon,
        VolumeUnit::Cup,
    ];
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for VolumeUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_symbol(s).as_str() {
            "ml" | "milliliter" | "millilitre" => Ok(VolumeUnit::Milliliter),
            "tsp" | "teaspoon" | "teaspoons" => Ok(VolumeUnit::Teaspoon),
            "tbsp" | "tablespoon" | "tablespoons" => Ok(VolumeUnit::Tablespoon),
            "cup" | "cups" => Ok(VolumeUnit::Cup),
            "mm3" | "mm^3" | "mm³" => Ok(VolumeUnit::CubicMillimeter),
            _ => Err(ConversionError::UnknownUnit(s.trim().to_string())),
        }
    }
}
