//! 인벤토리 스캔 설정
//!
//! [`InventoryConfig`]는 core의 [`ScanConfig`](fixbug_core::config::ScanConfig)에서
//! 파생되며 스캐너가 직접 사용하는 형태(경로 타입 등)로 보관합니다.
//!
//! # 사용 예시
//!
//! ```
//! use fixbug_inventory::InventoryConfig;
//!
//! // 기본값으로 생성
//! let config = InventoryConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! use fixbug_inventory::InventoryConfigBuilder;
//!
//! let config = InventoryConfigBuilder::new()
//!     .scan_dir("/opt/patches")
//!     .version_marker("RU_")
//!     .build()
//!     .unwrap();
//! ```

use std::path::PathBuf;

use fixbug_core::config::ScanConfig;

use crate::error::InventoryError;

/// descriptor 최대 허용 크기 상한 (256 MiB)
const MAX_DESCRIPTOR_SIZE_LIMIT: usize = 256 * 1024 * 1024;

/// 인벤토리 스캔 설정
///
/// # 필드
///
/// - **scan_dir**: ZIP 파일을 찾을 디렉토리 (직계 파일만)
/// - **archive_extension**: 아카이브 확장자 (대소문자 구분)
/// - **descriptor_name**: 멤버 이름 접미사 매칭에 쓰는 descriptor 파일명
/// - **version_marker**: 파일명에서 버전 토큰 앞에 오는 표식
/// - **max_descriptor_size**: descriptor 최대 크기 (바이트)
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// 스캔 대상 디렉토리
    pub scan_dir: PathBuf,
    /// 아카이브 확장자 (점 없이)
    pub archive_extension: String,
    /// descriptor 파일명
    pub descriptor_name: String,
    /// 버전 토큰 표식
    pub version_marker: String,
    /// descriptor 최대 허용 크기 (바이트)
    pub max_descriptor_size: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self::from_core(&ScanConfig::default())
    }
}

impl InventoryConfig {
    /// core의 `ScanConfig`에서 스캔 설정을 생성합니다.
    pub fn from_core(core: &ScanConfig) -> Self {
        Self {
            scan_dir: PathBuf::from(&core.dir),
            archive_extension: core.archive_extension.clone(),
            descriptor_name: core.descriptor_name.clone(),
            version_marker: core.version_marker.clone(),
            max_descriptor_size: core.max_descriptor_size,
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// `[scan]` 섹션 규칙은 여기에서만 검사합니다. 에러의 필드명은 설정 파일 키(`scan.*`)입니다.
    ///
    /// # 검증 규칙
    ///
    /// - `scan_dir`: 비어있으면 안 됨
    /// - `archive_extension`: 비어있거나 `.`을 포함하면 안 됨
    /// - `descriptor_name`: 비어있으면 안 됨
    /// - `max_descriptor_size`: 1-268435456 (256MB)
    ///
    /// `version_marker`는 비어 있어도 됩니다 (파일명 전체를 버전 토큰으로 사용).
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.scan_dir.as_os_str().is_empty() {
            return Err(InventoryError::Config {
                field: "scan.dir".to_owned(),
                reason: "scan directory must not be empty".to_owned(),
            });
        }

        if self.archive_extension.is_empty() || self.archive_extension.contains('.') {
            return Err(InventoryError::Config {
                field: "scan.archive_extension".to_owned(),
                reason: "must be a bare extension such as \"zip\"".to_owned(),
            });
        }

        if self.descriptor_name.is_empty() {
            return Err(InventoryError::Config {
                field: "scan.descriptor_name".to_owned(),
                reason: "descriptor file name must not be empty".to_owned(),
            });
        }

        if self.max_descriptor_size == 0 || self.max_descriptor_size > MAX_DESCRIPTOR_SIZE_LIMIT {
            return Err(InventoryError::Config {
                field: "scan.max_descriptor_size".to_owned(),
                reason: format!("must be 1-{MAX_DESCRIPTOR_SIZE_LIMIT}"),
            });
        }

        Ok(())
    }
}

/// [`InventoryConfig`] 빌더
///
/// 빌드 시 유효성 검증을 수행합니다.
#[derive(Default)]
pub struct InventoryConfigBuilder {
    config: InventoryConfig,
}

impl InventoryConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 스캔 디렉토리를 설정합니다.
    pub fn scan_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.scan_dir = dir.into();
        self
    }

    /// 아카이브 확장자를 설정합니다.
    pub fn archive_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.archive_extension = ext.into();
        self
    }

    /// descriptor 파일명을 설정합니다.
    pub fn descriptor_name(mut self, name: impl Into<String>) -> Self {
        self.config.descriptor_name = name.into();
        self
    }

    /// 버전 토큰 표식을 설정합니다.
    pub fn version_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.version_marker = marker.into();
        self
    }

    /// descriptor 최대 크기(바이트)를 설정합니다.
    pub fn max_descriptor_size(mut self, size: usize) -> Self {
        self.config.max_descriptor_size = size;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `InventoryError::Config` 반환
    pub fn build(self) -> Result<InventoryConfig, InventoryError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
