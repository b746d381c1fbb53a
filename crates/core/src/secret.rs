//! 시크릿 공급자 trait (자격 증명 저장소 확장 포인트)

use std::future::Future;

use crate::error::SecretError;

/// 이름으로 시크릿 문자열을 조회하는 trait
///
/// 구현체는 조회 실패를 [`SecretError`]로 보고해야 하며, 값이 없는 경우
/// 빈 문자열 대신 [`SecretError::NotFound`]를 반환합니다.
///
/// # Implementations
///
/// - `KeyVaultSecretProvider` (bgpship-shipper): Azure Key Vault REST API
/// - `EnvSecretProvider` (bgpship-shipper): `BGPSHIP_SECRET_*` 환경변수
pub trait SecretProvider: Send + Sync {
    /// 공급자 이름 (로그용)
    fn name(&self) -> &str;

    /// 시크릿 값을 조회합니다.
    fn get_secret(&self, name: &str) -> impl Future<Output = Result<String, SecretError>> + Send;
}
