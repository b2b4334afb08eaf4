//! 화면/터미널에 그대로 보여줄 계산 결과.

use std::fmt;

use crate::container::ContainerShape;
use crate::quantity::{CookingMethod, Measure, QuantityResult};

/// 전자레인지처럼 지원하지 않는 조리 방식을 골랐을 때 보여줄 문구.
pub const NOT_SUPPORTED_MESSAGE: &str = "Not supported at the moment.";

/// 입력 폼 한 장에 해당하는 값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorInput {
    pub container: ContainerShape,
    pub thickness_mm: f64,
    pub method: CookingMethod,
    pub measure: Measure,
}

impl Default for CalculatorInput {
    fn default() -> Self {
        Self {
            container: ContainerShape::Plate { diameter_mm: 152.4 },
            thickness_mm: 7.0,
            method: CookingMethod::Steam,
            measure: Measure::Volume,
        }
    }
}

/// 반올림된 값과 단위 기호.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount {
    pub value: f64,
    pub unit: &'static str,
}

impl Amount {
    pub fn new(value: f64, unit: &'static str) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub container: &'static str,
    /// 면적 [mm²] (반올림)
    pub area_mm2: f64,
    /// 두께 [mm] (반올림)
    pub thickness_mm: f64,
    pub method: CookingMethod,
    pub measure: Measure,
    /// 반올림 전 mL 기준 결과
    pub quantities: QuantityResult,
    pub starch: Amount,
    pub water: Amount,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} mm², {} mm thick), {}",
            self.container, self.area_mm2, self.thickness_mm, self.method
        )?;
        writeln!(f, "Starch {}: {}", self.measure.label(), self.starch)?;
        write!(f, "Water {}: {}", self.measure.label(), self.water)
    }
}
