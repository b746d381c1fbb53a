//! 시크릿 공급자 구현과 자격 증명 조회
//!
//! - [`KeyVaultSecretProvider`]: Azure Key Vault REST API. 인스턴스 메타데이터 엔드포인트의
//!   관리 ID 토큰으로 인증합니다.
//! - [`EnvSecretProvider`]: `BGPSHIP_SECRET_<NAME>` 환경변수 (로컬 실행, 테스트)
//!
//! [`fetch_credentials`]는 설정된 두 시크릿(워크스페이스 ID, 공유 키)만 조회합니다.

use std::time::Duration;

use bgpship_core::config::SecretsConfig;
use bgpship_core::error::{BgpshipError, ConfigError, SecretError};
use bgpship_core::{Credentials, SecretProvider};
use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::error::ShipperError;

/// 인스턴스 메타데이터 서비스(IMDS) 토큰 엔드포인트
pub const IMDS_TOKEN_URL: &str = "http://169.254.169.254/metadata/identity/oauth2/token";

const IMDS_API_VERSION: &str = "2018-02-01";
const KEY_VAULT_API_VERSION: &str = "7.4";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct SecretBundle {
    value: String,
}

/// Azure Key Vault 시크릿 공급자
///
/// 관리 ID 토큰은 첫 조회 때 한 번 발급받아 재사용합니다.
pub struct KeyVaultSecretProvider {
    http: reqwest::Client,
    vault_url: String,
    token_url: String,
    token_resource: String,
    token: OnceCell<String>,
}

impl KeyVaultSecretProvider {
    /// Vault 이름과 도메인으로 공급자를 생성합니다.
    pub fn new(vault_name: &str, vault_domain: &str) -> Result<Self, ShipperError> {
        let vault_name = vault_name.trim();
        if vault_name.is_empty() {
            return Err(ConfigError::MissingValue {
                field: "secrets.vault_name".to_owned(),
            }
            .into());
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            vault_url: format!("https://{}.{}", vault_name, vault_domain),
            token_url: IMDS_TOKEN_URL.to_owned(),
            token_resource: format!("https://{}", vault_domain),
            token: OnceCell::new(),
        })
    }

    /// 설정에서 공급자를 생성합니다. Vault 이름이 없으면 설정 에러입니다.
    pub fn from_config(config: &SecretsConfig) -> Result<Self, ShipperError> {
        let vault_name = config
            .vault_name
            .as_deref()
            .ok_or_else(|| ConfigError::MissingValue {
                field: "secrets.vault_name".to_owned(),
            })?;
        Self::new(vault_name, &config.vault_domain)
    }

    /// Vault 기본 URL을 바꿉니다.
    pub fn with_vault_url(mut self, url: impl Into<String>) -> Self {
        self.vault_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    /// 토큰 엔드포인트를 바꿉니다.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Vault 기본 URL
    pub fn vault_url(&self) -> &str {
        &self.vault_url
    }

    async fn access_token(&self, secret_name: &str) -> Result<&str, SecretError> {
        let token = self
            .token
            .get_or_try_init(|| self.fetch_token(secret_name))
            .await?;
        Ok(token.as_str())
    }

    async fn fetch_token(&self, secret_name: &str) -> Result<String, SecretError> {
        let provider_err = |reason: String| SecretError::Provider {
            name: secret_name.to_owned(),
            reason,
        };

        let resp = self
            .http
            .get(&self.token_url)
            .query(&[
                ("api-version", IMDS_API_VERSION),
                ("resource", self.token_resource.as_str()),
            ])
            .header("Metadata", "true")
            .send()
            .await
            .map_err(|e| provider_err(format!("managed identity token request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(provider_err(format!(
                "managed identity token request returned {}",
                status
            )));
        }

        let body: TokenResponse = resp
            .json()
            .await
            .map_err(|e| provider_err(format!("invalid token response: {}", e)))?;
        tracing::debug!("managed identity token acquired");
        Ok(body.access_token)
    }
}

impl std::fmt::Debug for KeyVaultSecretProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyVaultSecretProvider")
            .field("vault_url", &self.vault_url)
            .field("token_url", &self.token_url)
            .field("token_cached", &self.token.initialized())
            .finish()
    }
}

impl SecretProvider for KeyVaultSecretProvider {
    fn name(&self) -> &str {
        "key_vault"
    }

    async fn get_secret(&self, name: &str) -> Result<String, SecretError> {
        let token = self.access_token(name).await?;
        let url = format!("{}/secrets/{}", self.vault_url, name);

        let resp = self
            .http
            .get(&url)
            .query(&[("api-version", KEY_VAULT_API_VERSION)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SecretError::Provider {
                name: name.to_owned(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SecretError::NotFound {
                name: name.to_owned(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SecretError::Provider {
                name: name.to_owned(),
                reason: format!("key vault returned {}: {}", status, body),
            });
        }

        let bundle: SecretBundle = resp.json().await.map_err(|e| SecretError::Provider {
            name: name.to_owned(),
            reason: format!("invalid secret response: {}", e),
        })?;
        Ok(bundle.value)
    }
}

/// 환경변수 시크릿 공급자
///
/// 시크릿 `bgp-logws-id`는 `BGPSHIP_SECRET_BGP_LOGWS_ID`에서 읽습니다.
#[derive(Debug, Clone)]
pub struct EnvSecretProvider {
    prefix: String,
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::with_prefix("BGPSHIP_SECRET_")
    }
}

impl EnvSecretProvider {
    /// 기본 접두어(`BGPSHIP_SECRET_`)로 공급자를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 접두어를 지정해 공급자를 생성합니다.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// 시크릿 이름에 대응하는 환경변수 이름
    pub fn env_key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name.to_uppercase().replace('-', "_"))
    }
}

impl SecretProvider for EnvSecretProvider {
    fn name(&self) -> &str {
        "env"
    }

    async fn get_secret(&self, name: &str) -> Result<String, SecretError> {
        match std::env::var(self.env_key(name)) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(SecretError::NotFound {
                name: name.to_owned(),
            }),
        }
    }
}

/// 설정된 두 시크릿으로 자격 증명을 만듭니다.
///
/// # Errors
///
/// - 시크릿이 없거나 조회 실패: [`BgpshipError::Secret`]
/// - 공유 키가 base64가 아님: [`BgpshipError::Config`]
pub async fn fetch_credentials<P: SecretProvider>(
    provider: &P,
    config: &SecretsConfig,
) -> Result<Credentials, BgpshipError> {
    tracing::info!(provider = provider.name(), "fetching ingestion credentials");

    let workspace_id = provider.get_secret(&config.workspace_id_secret).await?;
    let shared_key = provider.get_secret(&config.shared_key_secret).await?;

    Ok(Credentials::new(workspace_id, shared_key)?)
}
