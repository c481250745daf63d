//! 설정 관리 -- fixbug.toml 파싱 및 런타임 설정
//!
//! [`FixbugConfig`]는 로깅과 스캔 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. 환경변수 (`FIXBUG_SCAN_DIR=/patches` 형식)
//! 2. 설정 파일 (`fixbug.toml`, 없으면 건너뜀)
//! 3. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), fixbug_core::error::FixbugError> {
//! use fixbug_core::config::FixbugConfig;
//!
//! // 파일이 있으면 로드 + 환경변수 오버라이드
//! let config = FixbugConfig::load_or_default("fixbug.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = FixbugConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, FixbugError};

/// 기본 설정 파일 이름
pub const DEFAULT_CONFIG_FILE: &str = "fixbug.toml";

/// 설정 파일 경로를 지정하는 환경변수
pub const CONFIG_PATH_ENV: &str = "FIXBUG_CONFIG";

/// fixbug 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixbugConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 스캔 설정
    #[serde(default)]
    pub scan: ScanConfig,
}

impl FixbugConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 파일이 없으면 `ConfigError::FileNotFound`를 반환합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixbugError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 있으면 [`load`](Self::load)와 같고, 없으면 기본값에 환경변수만 적용합니다.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, FixbugError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// `FIXBUG_CONFIG`가 지정되면 그 파일을 반드시 로드하고,
    /// 아니면 현재 디렉토리의 `fixbug.toml`을 선택적으로 로드합니다.
    pub fn discover() -> Result<Self, FixbugError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::load(path),
            _ => Self::load_or_default(DEFAULT_CONFIG_FILE),
        }
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FixbugError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FixbugError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                FixbugError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, FixbugError> {
        toml::from_str(toml_str).map_err(|e| {
            FixbugError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `FIXBUG_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "FIXBUG_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "FIXBUG_GENERAL_LOG_FORMAT");

        // Scan
        override_string(&mut self.scan.dir, "FIXBUG_SCAN_DIR");
        override_string(
            &mut self.scan.archive_extension,
            "FIXBUG_SCAN_ARCHIVE_EXTENSION",
        );
        override_string(
            &mut self.scan.descriptor_name,
            "FIXBUG_SCAN_DESCRIPTOR_NAME",
        );
        override_string(&mut self.scan.version_marker, "FIXBUG_SCAN_VERSION_MARKER");
        override_usize(
            &mut self.scan.max_descriptor_size,
            "FIXBUG_SCAN_MAX_DESCRIPTOR_SIZE",
        );
    }

    /// `[general]` 설정값의 유효성을 검증합니다.
    ///
    /// `[scan]` 값은 `fixbug-inventory`의 `InventoryConfig::validate`가 검증합니다.
    pub fn validate(&self) -> Result<(), FixbugError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["pretty", "json", "compact"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (pretty, json, compact)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 스캔 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// ZIP 파일을 찾을 디렉토리 (재귀 없음)
    pub dir: String,
    /// 아카이브 확장자 (점 없이)
    pub archive_extension: String,
    /// 아카이브 내 descriptor 파일명 (멤버 이름의 접미사로 매칭)
    pub descriptor_name: String,
    /// 파일명에서 버전 토큰 앞에 오는 표식
    pub version_marker: String,
    /// descriptor 최대 허용 크기 (바이트)
    pub max_descriptor_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_owned(),
            archive_extension: "zip".to_owned(),
            descriptor_name: "inventory.xml".to_owned(),
            version_marker: "RU_".to_owned(),
            max_descriptor_size: 16 * 1024 * 1024, // 16 MB
        }
    }
}

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
