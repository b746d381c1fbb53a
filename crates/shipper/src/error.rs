//! 덤프 전송 파이프라인 에러 타입
//!
//! [`ShipperError`]는 로테이션, 덤프 읽기, 서명, HTTP 클라이언트 구성 등
//! 한 번의 실행 안에서 발생하는 치명적 에러를 표현합니다.
//! 전송 거부(`Rejected`)와 네트워크 실패(`TransportFailed`)는 에러가 아니라
//! [`DeliveryOutcome`](crate::client::DeliveryOutcome)으로 보고됩니다.
//!
//! `From<ShipperError> for BgpshipError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 전파할 수 있습니다.

use std::path::PathBuf;

use bgpship_core::error::{BgpshipError, ConfigError, SecretError};

/// 덤프 전송 파이프라인 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ShipperError {
    /// 파일 이동/생성/추가 실패
    ///
    /// 덤프 파일이 중간 위치에 남아 있을 수 있으므로 단계와 경로를 그대로 보고합니다.
    #[error("rotation failed during {step} on {}: {source}", path.display())]
    Rotation {
        /// 실패한 단계 (stat, create, exchange, rename, chmod, append)
        step: &'static str,
        /// 대상 경로
        path: PathBuf,
        /// 원본 I/O 에러
        #[source]
        source: std::io::Error,
    },

    /// 덤프 리더 실패 (손상된 덤프, 잘린 파일, 파일 없음)
    #[error("read failed for {}: {reason}", path.display())]
    Read {
        /// 읽던 덤프 파일
        path: PathBuf,
        /// 실패 사유
        reason: String,
    },

    /// 요청 서명 실패
    #[error("signing failed: {0}")]
    Sign(String),

    /// HTTP 클라이언트 구성 실패
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// 배치 직렬화 실패
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// 블로킹 작업 태스크 실패
    #[error("task error: {0}")]
    Task(String),

    /// 설정/시크릿 에러
    #[error("{0}")]
    Core(#[from] BgpshipError),
}

impl ShipperError {
    /// 읽기 에러를 생성합니다.
    pub fn read(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn rotation(
        step: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Rotation {
            step,
            path: path.into(),
            source,
        }
    }
}

impl From<ConfigError> for ShipperError {
    fn from(err: ConfigError) -> Self {
        Self::Core(err.into())
    }
}

impl From<SecretError> for ShipperError {
    fn from(err: SecretError) -> Self {
        Self::Core(err.into())
    }
}

impl From<ShipperError> for BgpshipError {
    fn from(err: ShipperError) -> Self {
        match err {
            ShipperError::Core(inner) => inner,
            ShipperError::Rotation { source, .. } => BgpshipError::Io(source),
            other => BgpshipError::Io(std::io::Error::other(other.to_string())),
        }
    }
}
