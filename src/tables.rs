//! 단위 배율, 조리 방식 상수, 밀도를 담는 변환 테이블.
//!
//! 모든 테이블은 생성(또는 역직렬화) 시점에 검증되므로, 일단 만들어진 값은
//! 항상 각 단위를 정확히 한 번씩, 양의 유한 배율로 포함한다.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quantity::CookingMethod;
use crate::units::{LengthUnit, MassUnit, Unit, VolumeUnit};

/// 익힌 전분 반죽 기준 전분 밀도 [g/mL]
pub const STARCH_DENSITY: f64 = 0.561949898;
/// 물 밀도 [g/mL]
pub const WATER_DENSITY: f64 = 1.0;

/// 테이블 검증 실패.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("missing scale factor for unit `{0}`")]
    MissingUnit(&'static str),
    #[error("unit `{0}` is listed more than once")]
    DuplicateUnit(&'static str),
    #[error("scale factor for `{unit}` must be a positive number, got {factor}")]
    NonPositiveFactor { unit: &'static str, factor: f64 },
    #[error("missing constants for cooking method `{0}`")]
    MissingMethod(CookingMethod),
    #[error("cooking method `{0}` is listed more than once")]
    DuplicateMethod(CookingMethod),
    #[error("{name} for `{method}` must be a positive number, got {value}")]
    NonPositiveMethodConstant {
        method: CookingMethod,
        name: &'static str,
        value: f64,
    },
    #[error("density must be a positive number, got {0}")]
    NonPositiveDensity(f64),
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// `{unit, factor}` 한 쌍.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleEntry<U> {
    pub unit: U,
    pub factor: f64,
}

/// 한 차원의 단위별 배율 표. `U::ALL` 순서로 저장한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    bound = "U: Unit",
    try_from = "Vec<ScaleEntry<U>>",
    into = "Vec<ScaleEntry<U>>"
)]
pub struct ScaleTable<U> {
    factors: Vec<f64>,
    unit: PhantomData<U>,
}

impl<U: Unit> ScaleTable<U> {
    /// `{unit, factor}` 목록으로 표를 만든다. 순서는 상관없다.
    pub fn from_entries<I>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = ScaleEntry<U>>,
    {
        let mut slots: Vec<Option<f64>> = vec![None; U::ALL.len()];
        for entry in entries {
            if !is_positive(entry.factor) {
                return Err(TableError::NonPositiveFactor {
                    unit: entry.unit.symbol(),
                    factor: entry.factor,
                });
            }
            let slot = &mut slots[entry.unit.index()];
            if slot.is_some() {
                return Err(TableError::DuplicateUnit(entry.unit.symbol()));
            }
            *slot = Some(entry.factor);
        }
        let factors = U::ALL
            .iter()
            .zip(slots)
            .map(|(unit, slot)| slot.ok_or(TableError::MissingUnit(unit.symbol())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            factors,
            unit: PhantomData,
        })
    }

    /// 기준 단위 대비 배율.
    pub fn factor(&self, unit: U) -> f64 {
        self.factors[unit.index()]
    }

    /// 한 단위의 배율만 바꾼 새 표를 반환한다.
    pub fn with_factor(mut self, unit: U, factor: f64) -> Result<Self, TableError> {
        if !is_positive(factor) {
            return Err(TableError::NonPositiveFactor {
                unit: unit.symbol(),
                factor,
            });
        }
        self.factors[unit.index()] = factor;
        Ok(self)
    }

    pub fn entries(&self) -> impl Iterator<Item = ScaleEntry<U>> + '_ {
        U::ALL.iter().map(|unit| ScaleEntry {
            unit: *unit,
            factor: self.factor(*unit),
        })
    }
}

impl<U: Unit> Default for ScaleTable<U> {
    fn default() -> Self {
        Self {
            factors: U::ALL.iter().map(|u| u.default_factor()).collect(),
            unit: PhantomData,
        }
    }
}

impl<U: Unit> TryFrom<Vec<ScaleEntry<U>>> for ScaleTable<U> {
    type Error = TableError;

    fn try_from(value: Vec<ScaleEntry<U>>) -> Result<Self, Self::Error> {
        Self::from_entries(value)
    }
}

impl<U: Unit> From<ScaleTable<U>> for Vec<ScaleEntry<U>> {
    fn from(value: ScaleTable<U>) -> Self {
        value.entries().collect()
    }
}

/// 조리 방식별 상수.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodConstants {
    pub method: CookingMethod,
    /// 물:전분 체적비 (R)
    pub ratio: f64,
    /// 증발 보정 배수 (E)
    pub evaporation: f64,
}

impl MethodConstants {
    pub fn default_for(method: CookingMethod) -> Self {
        match method {
            CookingMethod::Steam => Self {
                method,
                ratio: 1.3,
                evaporation: 1.0,
            },
            // 검증되지 않은 자리표시 값. 계산 경로에서는 지원하지 않음으로 처리한다.
            CookingMethod::Microwave => Self {
                method,
                ratio: 1.0,
                evaporation: 1.0,
            },
        }
    }

    fn validate(&self) -> Result<(), TableError> {
        for (name, value) in [("ratio", self.ratio), ("evaporation", self.evaporation)] {
            if !is_positive(value) {
                return Err(TableError::NonPositiveMethodConstant {
                    method: self.method,
                    name,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// 조리 방식별 상수 표. `CookingMethod::ALL` 순서로 저장한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MethodConstants>", into = "Vec<MethodConstants>")]
pub struct MethodTable {
    constants: Vec<MethodConstants>,
}

impl MethodTable {
    pub fn from_entries<I>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = MethodConstants>,
    {
        let mut slots: Vec<Option<MethodConstants>> = vec![None; CookingMethod::ALL.len()];
        for entry in entries {
            entry.validate()?;
            let slot = &mut slots[entry.method.index()];
            if slot.is_some() {
                return Err(TableError::DuplicateMethod(entry.method));
            }
            *slot = Some(entry);
        }
        let constants = CookingMethod::ALL
            .iter()
            .zip(slots)
            .map(|(method, slot)| slot.ok_or(TableError::MissingMethod(*method)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { constants })
    }

    pub fn get(&self, method: CookingMethod) -> &MethodConstants {
        &self.constants[method.index()]
    }

    pub fn ratio(&self, method: CookingMethod) -> f64 {
        self.get(method).ratio
    }

    pub fn evaporation(&self, method: CookingMethod) -> f64 {
        self.get(method).evaporation
    }
}

impl Default for MethodTable {
    fn default() -> Self {
        Self {
            constants: CookingMethod::ALL
                .iter()
                .map(|m| MethodConstants::default_for(*m))
                .collect(),
        }
    }
}

impl TryFrom<Vec<MethodConstants>> for MethodTable {
    type Error = TableError;

    fn try_from(value: Vec<MethodConstants>) -> Result<Self, Self::Error> {
        Self::from_entries(value)
    }
}

impl From<MethodTable> for Vec<MethodConstants> {
    fn from(value: MethodTable) -> Self {
        value.constants
    }
}

/// 밀도 [g/mL]. 항상 양의 유한값이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Density(f64);

impl Density {
    pub fn new(g_per_ml: f64) -> Result<Self, TableError> {
        if is_positive(g_per_ml) {
            Ok(Self(g_per_ml))
        } else {
            Err(TableError::NonPositiveDensity(g_per_ml))
        }
    }

    pub fn g_per_ml(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Density {
    type Error = TableError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Density> for f64 {
    fn from(value: Density) -> Self {
        value.0
    }
}

/// 엔진에 주입하는 변환 설정 전체.
///
/// 스칼라 필드를 배열 테이블보다 먼저 두어야 TOML 직렬화 시 섹션 순서가 맞는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionTables {
    pub starch_density: Density,
    pub water_density: Density,
    pub length: ScaleTable<LengthUnit>,
    pub mass: ScaleTable<MassUnit>,
    pub volume: ScaleTable<VolumeUnit>,
    pub methods: MethodTable,
}

impl Default for ConversionTables {
    fn default() -> Self {
        Self {
            starch_density: Density(STARCH_DENSITY),
            water_density: Density(WATER_DENSITY),
            length: ScaleTable::default(),
            mass: ScaleTable::default(),
            volume: ScaleTable::default(),
            methods: MethodTable::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_match_reference_factors() {
        let t = ConversionTables::default();
        assert_eq!(t.length.factor(LengthUnit::Inch), 25.4);
        assert_eq!(t.mass.factor(MassUnit::Ounce), 28.3495);
        assert_eq!(t.volume.factor(VolumeUnit::Tablespoon), 14.79);
        assert_eq!(t.volume.factor(VolumeUnit::CubicMillimeter), 0.001);
        assert_eq!(t.methods.ratio(CookingMethod::Steam), 1.3);
        assert_eq!(t.starch_density.g_per_ml(), STARCH_DENSITY);
    }

    #[test]
    fn scale_table_requires_every_unit() {
        let err = ScaleTable::from_entries([
            ScaleEntry { unit: MassUnit::Gram, factor: 1.0 },
        ])
        .unwrap_err();
        assert_eq!(err, TableError::MissingUnit("oz"));
    }

    #[test]
    fn scale_table_rejects_duplicates_and_bad_factors() {
        let dup = ScaleTable::from_entries([
            ScaleEntry { unit: MassUnit::Gram, factor: 1.0 },
            ScaleEntry { unit: MassUnit::Gram, factor: 1.0 },
            ScaleEntry { unit: MassUnit::Ounce, factor: 28.0 },
        ])
        .unwrap_err();
        assert_eq!(dup, TableError::DuplicateUnit("g"));

        let zero = ScaleTable::<MassUnit>::default()
            .with_factor(MassUnit::Ounce, 0.0)
            .unwrap_err();
        assert!(matches!(zero, TableError::NonPositiveFactor { unit: "oz", .. }));

        let nan = ScaleTable::<MassUnit>::default().with_factor(MassUnit::Ounce, f64::NAN);
        assert!(nan.is_err());
    }

    #[test]
    fn method_table_rejects_non_positive_ratio() {
        let err = MethodTable::from_entries([
            MethodConstants { method: CookingMethod::Steam, ratio: -1.0, evaporation: 1.0 },
            MethodConstants::default_for(CookingMethod::Microwave),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            TableError::NonPositiveMethodConstant { name: "ratio", .. }
        ));
    }

    #[test]
    fn density_must_be_positive() {
        assert!(Density::new(0.0).is_err());
        assert!(Density::new(-0.5).is_err());
        assert_eq!(Density::new(1.2).unwrap().g_per_ml(), 1.2);
    }
}
