use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{normalize_symbol, Dimension, Unit};
use crate::conversion::ConversionError;
use crate::tables::{ConversionTables, ScaleTable};

/// 길이 단위. 내부 기준은 밀리미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "inch", alias = "in")]
    Inch,
}

impl Unit for LengthUnit {
    const DIMENSION: Dimension = Dimension::Length;
    const BASE: Self = LengthUnit::Millimeter;
    const ALL: &'static [Self] = &[
        LengthUnit::Millimeter,
        LengthUnit::Centimeter,
        LengthUnit::Inch,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Inch => "inch",
        }
    }

    fn default_factor(self) -> f64 {
        match self {
            LengthUnit::Millimeter => 1.0,
            LengthUnit::Centimeter => 10.0,
            LengthUnit::Inch => 25.4,
        }
    }

    fn scale_table(tables: &ConversionTables) -> &ScaleTable<Self> {
        &tables.length
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_symbol(s).as_str() {
            "mm" | "millimeter" | "millimetre" => Ok(LengthUnit::Millimeter),
            "cm" | "centimeter" | "centimetre" => Ok(LengthUnit::Centimeter),
            "in" | "inch" | "inches" | "\"" => Ok(LengthUnit::Inch),
            _ => Err(ConversionError::UnknownUnit(s.trim().to_string())),
        }
    }
}
