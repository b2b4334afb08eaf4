use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{normalize_symbol, Dimension, Unit};
use crate::conversion::ConversionError;
use crate::tables::{ConversionTables, ScaleTable};

/// 질량 단위. 내부 기준은 g이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MassUnit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "oz")]
    Ounce,
}

impl Unit for MassUnit {
    const DIMENSION: Dimension = Dimension::Mass;
    const BASE: Self = MassUnit::Gram;
    const ALL: &'static [Self] = &[MassUnit::Gram, MassUnit::Ounce];

    fn index(self) -> usize {
        self as usize
    }

    fn symbol(self) -> &'static str {
        match self {
            MassUnit::Gram => "g",
            MassUnit::Ounce => "oz",
        }
    }

    fn default_factor(self) -> f64 {
        match self {
            MassUnit::Gram => 1.0,
            MassUnit::Ounce => 28.3495,
        }
    }

    fn scale_table(tables: &ConversionTables) -> &ScaleTable<Self> {
        &tables.mass
    }
}

impl fmt::Display for MassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for MassUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_symbol(s).as_str() {
            "g" | "gram" | "grams" => Ok(MassUnit::Gram),
            "oz" | "ounce" | "ounces" => Ok(MassUnit::Ounce),
            _ => Err(ConversionError::UnknownUnit(s.trim().to_string())),
        }
    }
}
