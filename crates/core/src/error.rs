//! 에러 타입 -- 도메인별 에러 정의

/// bgpship 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum BgpshipError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 시크릿 조회 에러
    #[error("secret error: {0}")]
    Secret(#[from] SecretError),

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

    /// 필수 값 누락 (CLI 인자 또는 설정 파일)
    #[error("missing required value: {field}")]
    MissingValue { field: String },
}

/// 시크릿 조회 에러
///
/// 실행에 필요한 시크릿이 하나라도 없으면 전체 실행이 중단됩니다.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    /// 시크릿이 존재하지 않음
    #[error("secret '{name}' not found")]
    NotFound { name: String },

    /// 시크릿 저장소 호출 실패 (인증, 네트워크 등)
    #[error("secret provider failed for '{name}': {reason}")]
    Provider { name: String, reason: String },
}
