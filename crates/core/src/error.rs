//! 에러 타입 -- 도메인별 에러 정의

/// fixbug 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum FixbugError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 아카이브 스캔 / inventory.xml 처리 에러
    #[error("inventory error: {0}")]
    Inventory(#[from] InventoryFailure),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 인벤토리 처리 에러 (모듈 에러의 요약 형태)
#[derive(Debug, thiserror::Error)]
pub enum InventoryFailure {
    /// 아카이브를 열 수 없음
    #[error("archive unreadable: {0}")]
    Archive(String),

    /// inventory.xml 파싱 실패
    #[error("descriptor parse failed: {0}")]
    Descriptor(String),

    /// 결과 파일 저장 실패
    #[error("report write failed: {0}")]
    Write(String),
}
