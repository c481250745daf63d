#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, FixbugError, InventoryFailure};

// 설정
pub use config::{FixbugConfig, GeneralConfig, ScanConfig};

// 도메인 타입
pub use types::{BugRecord, PatchRecord};
