//! 요청 서명 (SharedKey)
//!
//! 수집 엔드포인트는 HMAC-SHA256 기반 `SharedKey` 인증을 요구합니다.
//! 서명 대상 문자열은 다음 다섯 줄로 구성됩니다.
//!
//! ```text
//! METHOD
//! CONTENT_LENGTH
//! CONTENT_TYPE
//! x-ms-date:TIMESTAMP
//! RESOURCE_PATH
//! ```
//!
//! 결과는 `SharedKey {workspace_id}:{base64(hmac)}` 형식의 `Authorization` 헤더 값입니다.
//! 모든 함수는 상태가 없고 결정적입니다.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::ShipperError;

type HmacSha256 = Hmac<Sha256>;

/// `x-ms-date` 헤더 형식 (RFC 1123, 항상 GMT)
const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// 서명 입력
///
/// 필드는 서명 대상 문자열의 순서와 같습니다.
#[derive(Debug, Clone, Copy)]
pub struct SigningInput<'a> {
    /// HTTP 메서드 (`POST`)
    pub method: &'a str,
    /// 본문 바이트 길이
    pub content_length: usize,
    /// 콘텐츠 타입 (`application/json`)
    pub content_type: &'a str,
    /// RFC 1123 형식 타임스탬프
    pub date: &'a str,
    /// 리소스 경로 (`/api/logs`)
    pub resource: &'a str,
}

impl SigningInput<'_> {
    fn string_to_sign(&self) -> String {
        format!(
            "{}\n{}\n{}\nx-ms-date:{}\n{}",
            self.method, self.content_length, self.content_type, self.date, self.resource
        )
    }
}

/// `Authorization` 헤더 값을 계산합니다.
///
/// # Errors
///
/// 공유 키가 base64로 디코딩되지 않으면 [`ShipperError::Sign`]을 반환합니다.
pub fn build_signature(
    workspace_id: &str,
    shared_key_base64: &str,
    date: &str,
    content_length: usize,
    method: &str,
    content_type: &str,
    resource: &str,
) -> Result<String, ShipperError> {
    sign(
        workspace_id,
        shared_key_base64,
        &SigningInput {
            method,
            content_length,
            content_type,
            date,
            resource,
        },
    )
}

/// [`SigningInput`]으로 `Authorization` 헤더 값을 계산합니다.
pub fn sign(
    workspace_id: &str,
    shared_key_base64: &str,
    input: &SigningInput<'_>,
) -> Result<String, ShipperError> {
    let key = STANDARD
        .decode(shared_key_base64.as_bytes())
        .map_err(|e| ShipperError::Sign(format!("shared key is not valid base64: {}", e)))?;

    let mut mac = HmacSha256::new_from_slice(&key)
        .map_err(|e| ShipperError::Sign(format!("invalid hmac key: {}", e)))?;
    mac.update(input.string_to_sign().as_bytes());
    let digest = STANDARD.encode(mac.finalize().into_bytes());

    Ok(format!("SharedKey {}:{}", workspace_id, digest))
}

/// `x-ms-date` 헤더용 RFC 1123 타임스탬프를 생성합니다.
pub fn rfc1123_date(at: DateTime<Utc>) -> String {
    at.format(RFC1123_FORMAT).to_string()
}
