use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::tables::ConversionTables;
use crate::units::{LengthUnit, MassUnit, VolumeUnit};

/// 별도 지정이 없을 때 읽는 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 입력/결과 항목별 기본 표시 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayUnits {
    /// 접시 지름
    pub diameter: LengthUnit,
    /// 도시락통 가로
    pub width: LengthUnit,
    /// 도시락통 세로
    pub length: LengthUnit,
    /// 피 두께
    pub thickness: LengthUnit,
    /// 체적 결과
    pub volume: VolumeUnit,
    /// 질량 결과
    pub mass: MassUnit,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            diameter: LengthUnit::Inch,
            width: LengthUnit::Centimeter,
            length: LengthUnit::Centimeter,
            thickness: LengthUnit::Millimeter,
            volume: VolumeUnit::Tablespoon,
            mass: MassUnit::Gram,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayUnits,
    pub tables: ConversionTables,
}

/// 설정 로드 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 문법 오류 또는 테이블 검증 실패
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
}

impl Config {
    /// TOML 문자열에서 설정을 읽는다. 빠진 항목은 기본값으로 채운다.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// 지정한 경로의 설정 파일을 읽는다.
pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let cfg = Config::from_toml_str(&content)?;
    info!(path = %path.display(), "loaded config");
    Ok(cfg)
}

/// 명시한 경로가 있으면 그 파일을, 없으면 config.toml을 읽는다.
/// config.toml도 없으면 기본 설정을 쓴다. 파일은 만들지 않는다.
pub fn load_or_default(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }
    let path = Path::new(DEFAULT_CONFIG_PATH);
    if path.exists() {
        load_from_path(path)
    } else {
        debug!("no config.toml found, using built-in tables");
        Ok(Config::default())
    }
}
