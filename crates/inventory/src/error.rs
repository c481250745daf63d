//! 인벤토리 모듈 에러 타입
//!
//! [`InventoryError`]는 아카이브 스캔, inventory.xml 파싱, 결과 파일 저장 중
//! 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<InventoryError> for FixbugError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **아카이브**: `Archive` (복구 가능, 해당 아카이브만 건너뜀)
//! - **descriptor**: `DescriptorParse`, `DescriptorTooLarge` (복구 가능)
//! - **설정**: `Config`
//! - **파일 I/O**: `Io` (결과 파일 저장 실패 시 치명적)

use fixbug_core::error::{FixbugError, InventoryFailure};

/// 인벤토리 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// 유효한 ZIP 아카이브가 아니거나 읽을 수 없음
    #[error("archive error: {path}: {reason}")]
    Archive {
        /// 아카이브 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// inventory.xml 파싱 실패
    #[error("descriptor parse error: {source_name}: {reason}")]
    DescriptorParse {
        /// descriptor 위치 (`archive.zip/inventory.xml`)
        source_name: String,
        /// 파싱 실패 사유
        reason: String,
    },

    /// descriptor 크기 초과
    #[error("descriptor too large: {source_name}: {size} bytes (max: {max})")]
    DescriptorTooLarge {
        /// descriptor 위치
        source_name: String,
        /// 실제 크기 (바이트)
        size: u64,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },
}

impl From<InventoryError> for FixbugError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::Archive { path, reason } => {
                FixbugError::Inventory(InventoryFailure::Archive(format!("{path}: {reason}")))
            }
            InventoryError::DescriptorParse {
                source_name,
                reason,
            } => FixbugError::Inventory(InventoryFailure::Descriptor(format!(
                "{source_name}: {reason}"
            ))),
            InventoryError::DescriptorTooLarge {
                source_name,
                size,
                max,
            } => FixbugError::Inventory(InventoryFailure::Descriptor(format!(
                "{source_name}: {size} bytes (max: {max})"
            ))),
            InventoryError::Config { field, reason } => {
                FixbugError::Config(fixbug_core::error::ConfigError::InvalidValue {
                    field,
                    reason,
                })
            }
            InventoryError::Io { path, source } => {
                FixbugError::Inventory(InventoryFailure::Write(format!("{path}: {source}")))
            }
        }
    }
}
