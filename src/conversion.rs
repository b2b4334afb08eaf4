use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DisplayUnits;
use crate::container::{self, ContainerShape};
use crate::quantity::{
    ensure_non_negative, CookingMethod, Measure, QuantityError, QuantityRequest, QuantityResult,
};
use crate::report::{Amount, CalculatorInput, Report};
use crate::tables::ConversionTables;
use crate::units::{AnyUnit, Dimension, MassUnit, Unit, VolumeUnit};

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    /// 서로 다른 차원 간 변환 시도
    #[error("cannot convert {from} to {to}")]
    InvalidDimension { from: Dimension, to: Dimension },
}

/// 화면 표시용으로 소수점 셋째 자리에서 반올림한다. 내부 계산에는 쓰지 않는다.
pub fn round(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// 체적 [mL] × 밀도 [g/mL] = 질량 [g]
pub fn to_mass(volume_ml: f64, density_g_per_ml: f64) -> f64 {
    volume_ml * density_g_per_ml
}

fn ensure_supported(method: CookingMethod) -> Result<(), QuantityError> {
    if method.is_supported() {
        Ok(())
    } else {
        warn!(%method, "unsupported cooking method requested");
        Err(QuantityError::UnsupportedMethod(method))
    }
}

/// 단위 변환과 전분/물 수량 계산을 담당한다.
///
/// 상태 없이 주입된 테이블만 참조하므로, 입력이 바뀔 때마다 그대로 다시 호출하면 된다.
#[derive(Debug, Clone, Default)]
pub struct ConversionEngine {
    tables: ConversionTables,
}

impl ConversionEngine {
    pub fn new(tables: ConversionTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ConversionTables {
        &self.tables
    }

    /// 같은 차원 안에서 단위를 변환한다: value × scale[from] / scale[to]
    pub fn convert<U: Unit>(&self, value: f64, from: U, to: U) -> f64 {
        if from == to {
            return value;
        }
        let table = U::scale_table(&self.tables);
        value * table.factor(from) / table.factor(to)
    }

    /// 런타임 단위 간 변환. 차원이 다르면 즉시 실패한다.
    pub fn convert_any(&self, value: f64, from: AnyUnit, to: AnyUnit) -> Result<f64, ConversionError> {
        match (from, to) {
            (AnyUnit::Length(a), AnyUnit::Length(b)) => Ok(self.convert(value, a, b)),
            (AnyUnit::Mass(a), AnyUnit::Mass(b)) => Ok(self.convert(value, a, b)),
            (AnyUnit::Volume(a), AnyUnit::Volume(b)) => Ok(self.convert(value, a, b)),
            _ => Err(ConversionError::InvalidDimension {
                from: from.dimension(),
                to: to.dimension(),
            }),
        }
    }

    /// 단위 문자열(`inch`, `tbsp`, `oz` 등)을 해석한 뒤 변환한다.
    pub fn convert_symbols(&self, value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        let from: AnyUnit = from.parse()?;
        let to: AnyUnit = to.parse()?;
        self.convert_any(value, from, to)
    }

    pub fn area_of_plate(&self, diameter_mm: f64) -> Result<f64, QuantityError> {
        container::area_of_plate(diameter_mm)
    }

    pub fn area_of_bento_box(&self, width_mm: f64, length_mm: f64) -> Result<f64, QuantityError> {
        container::area_of_bento_box(width_mm, length_mm)
    }

    pub fn area_of(&self, shape: &ContainerShape) -> Result<f64, QuantityError> {
        shape.area_mm2()
    }

    /// 면적·두께·조리 방식으로 필요한 전분과 물의 체적을 구한다.
    pub fn derive_quantities(&self, request: &QuantityRequest) -> Result<QuantityResult, QuantityError> {
        ensure_supported(request.method)?;
        let area = ensure_non_negative("area", request.area_mm2)?;
        let thickness = ensure_non_negative("thickness", request.thickness_mm)?;

        let final_water_volume_ml = self.convert(
            area * thickness,
            VolumeUnit::CubicMillimeter,
            VolumeUnit::Milliliter,
        );
        let constants = self.tables.methods.get(request.method);
        Ok(QuantityResult {
            final_water_volume_ml,
            starch_volume_ml: final_water_volume_ml / constants.ratio,
            water_volume_ml: final_water_volume_ml * constants.evaporation,
        })
    }

    /// 화면 한 장 분량의 입력을 받아 표시 단위로 반올림된 결과를 만든다.
    pub fn evaluate(&self, input: &CalculatorInput, display: &DisplayUnits) -> Result<Report, QuantityError> {
        ensure_supported(input.method)?;
        let area_mm2 = self.area_of(&input.container)?;
        let quantities = self.derive_quantities(&QuantityRequest {
            area_mm2,
            thickness_mm: input.thickness_mm,
            method: input.method,
        })?;

        let (starch, water) = match input.measure {
            Measure::Volume => {
                let unit = display.volume;
                (
                    self.volume_amount(quantities.starch_volume_ml, unit),
                    self.volume_amount(quantities.water_volume_ml, unit),
                )
            }
            Measure::Mass => {
                let unit = display.mass;
                let starch_g = quantities.starch_mass_g(&self.tables);
                let water_g = quantities.water_mass_g(&self.tables);
                (
                    self.mass_amount(starch_g, unit),
                    self.mass_amount(water_g, unit),
                )
            }
        };

        debug!(
            container = input.container.label(),
            area_mm2,
            thickness_mm = input.thickness_mm,
            starch_ml = quantities.starch_volume_ml,
            water_ml = quantities.water_volume_ml,
            "evaluated quantities"
        );

        Ok(Report {
            container: input.container.label(),
            area_mm2: round(area_mm2),
            thickness_mm: round(input.thickness_mm),
            method: input.method,
            measure: input.measure,
            quantities,
            starch,
            water,
        })
    }

    fn mass_amount(&self, mass_g: f64, unit: MassUnit) -> Amount {
        Amount::new(round(self.convert(mass_g, MassUnit::Gram, unit)), unit.symbol())
    }

    fn volume_amount(&self, volume_ml: f64, unit: VolumeUnit) -> Amount {
        Amount::new(
            round(self.convert(volume_ml, VolumeUnit::Milliliter, unit)),
            unit.symbol(),
        )
    }
}
