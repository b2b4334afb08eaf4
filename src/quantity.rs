use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conversion::to_mass;
use crate::tables::ConversionTables;

/// 조리 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CookingMethod {
    Steam,
    Microwave,
}

impl CookingMethod {
    pub const ALL: &'static [CookingMethod] = &[CookingMethod::Steam, CookingMethod::Microwave];

    pub fn index(self) -> usize {
        self as usize
    }

    /// 검증된 비율 상수가 있는 방식인지 여부.
    /// 전자레인지는 아직 최적 비율을 찾지 못했으므로 계산하지 않는다.
    pub fn is_supported(self) -> bool {
        matches!(self, CookingMethod::Steam)
    }

    pub fn label(self) -> &'static str {
        match self {
            CookingMethod::Steam => "Steam",
            CookingMethod::Microwave => "Microwave",
        }
    }
}

impl fmt::Display for CookingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 결과를 체적으로 볼지 질량으로 볼지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    #[default]
    Volume,
    Mass,
}

impl Measure {
    pub fn label(self) -> &'static str {
        match self {
            Measure::Volume => "Volume",
            Measure::Mass => "Mass",
        }
    }
}

/// 수량 계산 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantityError {
    /// 비율 상수가 검증되지 않은 조리 방식
    #[error("cooking method `{0}` is not supported at the moment")]
    UnsupportedMethod(CookingMethod),
    /// 음수 또는 유한하지 않은 입력
    #[error("invalid {field}: {value} (must be a non-negative number)")]
    InvalidInput { field: &'static str, value: f64 },
}

/// 치수/두께 입력을 검사한다. 0은 허용한다.
pub fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64, QuantityError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(QuantityError::InvalidInput { field, value })
    }
}

/// 수량 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityRequest {
    /// 용기 바닥 면적 [mm²]
    pub area_mm2: f64,
    /// 목표 피 두께 [mm]
    pub thickness_mm: f64,
    pub method: CookingMethod,
}

/// 수량 계산 결과. 모든 값은 mL 기준이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityResult {
    /// 완성된 피에 남아야 하는 물의 체적 [mL]
    pub final_water_volume_ml: f64,
    /// 필요한 전분 체적 [mL]
    pub starch_volume_ml: f64,
    /// 넣어야 하는 물 체적 [mL] (증발 보정 포함)
    pub water_volume_ml: f64,
}

impl QuantityResult {
    /// 전분 질량 [g]
    pub fn starch_mass_g(&self, tables: &ConversionTables) -> f64 {
        to_mass(self.starch_volume_ml, tables.starch_density.g_per_ml())
    }

    /// 물 질량 [g]
    pub fn water_mass_g(&self, tables: &ConversionTables) -> f64 {
        to_mass(self.water_volume_ml, tables.water_density.g_per_ml())
    }
}
