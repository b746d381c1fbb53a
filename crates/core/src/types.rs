//! 도메인 타입 -- 실행 동안 메모리에만 보관되는 수집 자격 증명

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, Secret};

use crate::error::ConfigError;

/// 수집 엔드포인트 자격 증명
///
/// 실행당 한 번 시크릿 저장소에서 조회되며, 공유 키는 [`Secret`]으로 감싸
/// `Debug` 출력이나 로그에 노출되지 않습니다.
#[derive(Clone)]
pub struct Credentials {
    workspace_id: String,
    shared_key: Secret<String>,
}

impl Credentials {
    /// 워크스페이스 ID와 base64 공유 키로 자격 증명을 생성합니다.
    ///
    /// 공유 키가 base64로 디코딩되지 않으면 서명 전에 실패하도록 여기서 거부합니다.
    pub fn new(
        workspace_id: impl Into<String>,
        shared_key_base64: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let workspace_id = workspace_id.into().trim().to_owned();
        let shared_key = shared_key_base64.into().trim().to_owned();

        if workspace_id.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "workspace_id".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if STANDARD.decode(shared_key.as_bytes()).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "shared_key".to_owned(),
                reason: "not valid base64".to_owned(),
            });
        }

        Ok(Self {
            workspace_id,
            shared_key: Secret::new(shared_key),
        })
    }

    /// 워크스페이스 ID
    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    /// base64 인코딩된 공유 키
    pub fn shared_key(&self) -> &str {
        self.shared_key.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("workspace_id", &self.workspace_id)
            .field("shared_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_shared_key() {
        let creds = Credentials::new("ws-1234", "c2VjcmV0LWtleQ==").unwrap();
        let debug = format!("{:?}", creds);
        assert!(debug.contains("ws-1234"));
        assert!(!debug.contains("c2VjcmV0LWtleQ=="));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn trims_whitespace_from_secret_values() {
        let creds = Credentials::new(" ws-1234\n", "c2VjcmV0LWtleQ==\n").unwrap();
        assert_eq!(creds.workspace_id(), "ws-1234");
        assert_eq!(creds.shared_key(), "c2VjcmV0LWtleQ==");
    }

    #[test]
    fn rejects_invalid_base64_key() {
        let err = Credentials::new("ws-1234", "not base64 !!").unwrap_err();
        assert!(err.to_string().contains("shared_key"));
    }

    #[test]
    fn rejects_empty_workspace_id() {
        assert!(Credentials::new("", "c2VjcmV0LWtleQ==").is_err());
    }
}
