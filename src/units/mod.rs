//! 단위 정의 모듈 모음.
//!
//! 차원(길이/질량/체적)마다 별도 enum을 두어, 서로 다른 차원 간 변환은
//! 타입 단계에서 막는다. 문자열 입력처럼 차원을 런타임에야 알 수 있는 경우에는
//! [`AnyUnit`]을 사용하고, 변환 시점에 차원을 검사한다.

pub mod length;
pub mod mass;
pub mod volume;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::conversion::ConversionError;
use crate::tables::{ConversionTables, ScaleTable};

pub use length::LengthUnit;
pub use mass::MassUnit;
pub use volume::VolumeUnit;

/// 단위가 속하는 물리 차원.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Length,
    Mass,
    Volume,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Length => "length",
            Dimension::Mass => "mass",
            Dimension::Volume => "volume",
        };
        f.write_str(name)
    }
}

/// 한 차원에 속한 단위 enum이 구현하는 공통 트레이트.
///
/// `ALL`은 선언 순서를 따르며 `index()`는 그 안의 위치와 같아야 한다.
/// [`ScaleTable`]이 이 순서로 배율을 저장한다.
pub trait Unit:
    Copy
    + Eq
    + fmt::Debug
    + fmt::Display
    + FromStr<Err = ConversionError>
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    const DIMENSION: Dimension;
    /// 배율이 1인 기준 단위
    const BASE: Self;
    const ALL: &'static [Self];

    fn index(self) -> usize;

    /// 화면 표시용 기호.
    fn symbol(self) -> &'static str;

    /// 기준 단위 대비 기본 배율 (1 단위 = factor 기준 단위).
    fn default_factor(self) -> f64;

    /// 설정 테이블에서 이 차원의 배율 표를 꺼낸다.
    fn scale_table(tables: &ConversionTables) -> &ScaleTable<Self>;
}

/// 차원 태그가 붙은 런타임 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyUnit {
    Length(LengthUnit),
    Mass(MassUnit),
    Volume(VolumeUnit),
}

impl AnyUnit {
    pub fn dimension(self) -> Dimension {
        match self {
            AnyUnit::Length(_) => Dimension::Length,
            AnyUnit::Mass(_) => Dimension::Mass,
            AnyUnit::Volume(_) => Dimension::Volume,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AnyUnit::Length(u) => u.symbol(),
            AnyUnit::Mass(u) => u.symbol(),
            AnyUnit::Volume(u) => u.symbol(),
        }
    }

    /// 모든 차원의 단위 목록.
    pub fn all() -> impl Iterator<Item = AnyUnit> {
        LengthUnit::ALL
            .iter()
            .map(|u| AnyUnit::Length(*u))
            .chain(MassUnit::ALL.iter().map(|u| AnyUnit::Mass(*u)))
            .chain(VolumeUnit::ALL.iter().map(|u| AnyUnit::Volume(*u)))
    }
}

impl fmt::Display for AnyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for AnyUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // 기호가 차원 간에 겹치지 않으므로 순서대로 시도해도 된다.
        s.parse::<LengthUnit>()
            .map(AnyUnit::Length)
            .or_else(|_| s.parse::<MassUnit>().map(AnyUnit::Mass))
            .or_else(|_| s.parse::<VolumeUnit>().map(AnyUnit::Volume))
            .map_err(|_| ConversionError::UnknownUnit(s.trim().to_string()))
    }
}

impl From<LengthUnit> for AnyUnit {
    fn from(value: LengthUnit) -> Self {
        AnyUnit::Length(value)
    }
}

impl From<MassUnit> for AnyUnit {
    fn from(value: MassUnit) -> Self {
        AnyUnit::Mass(value)
    }
}

impl From<VolumeUnit> for AnyUnit {
    fn from(value: VolumeUnit) -> Self {
        AnyUnit::Volume(value)
    }
}

/// 단위 문자열 비교용 정규화: 앞뒤 공백 제거 후 소문자.
pub(crate) fn normalize_symbol(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_index_matches_all<U: Unit>() {
        for (i, u) in U::ALL.iter().enumerate() {
            assert_eq!(u.index(), i, "{u:?}");
        }
        assert_eq!(U::BASE.default_factor(), 1.0);
    }

    #[test]
    fn index_follows_declaration_order() {
        assert_index_matches_all::<LengthUnit>();
        assert_index_matches_all::<MassUnit>();
        assert_index_matches_all::<VolumeUnit>();
    }

    #[test]
    fn symbols_parse_back_to_same_unit() {
        for unit in AnyUnit::all() {
            let parsed: AnyUnit = unit.symbol().parse().expect("symbol should parse");
            assert_eq!(parsed, unit);
        }
    }

    #[test]
    fn any_unit_reports_dimension() {
        assert_eq!("inch".parse::<AnyUnit>().unwrap().dimension(), Dimension::Length);
        assert_eq!("OZ".parse::<AnyUnit>().unwrap().dimension(), Dimension::Mass);
        assert_eq!(" tbsp ".parse::<AnyUnit>().unwrap().dimension(), Dimension::Volume);
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let err = "furlong".parse::<AnyUnit>().unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit(ref s) if s == "furlong"));
    }
}
