//! 설정 관리 -- bgpship.toml 파싱 및 런타임 설정
//!
//! [`BgpshipConfig`]는 덤프 파일 경로, 리더, 수집 엔드포인트, 시크릿 설정을 담는
//! 최상위 구조체입니다. 오케스트레이터는 전역 상수 대신 이 값을 생성 시점에 전달받습니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`BGPSHIP_ROTATION_ACTIVE_PATH=/tmp/dump` 형식)
//! 3. 설정 파일 (`bgpship.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), bgpship_core::error::BgpshipError> {
//! use bgpship_core::config::BgpshipConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = BgpshipConfig::load("bgpship.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = BgpshipConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{BgpshipError, ConfigError};

/// 수집 엔드포인트 요청 타임아웃 상한 (초)
const MAX_TIMEOUT_SECS: u64 = 600;

/// bgpship 통합 설정
///
/// `bgpship.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BgpshipConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 덤프 파일 로테이션 경로
    #[serde(default)]
    pub rotation: RotationConfig,
    /// 덤프 리더 설정
    #[serde(default)]
    pub reader: ReaderConfig,
    /// 수집 엔드포인트 설정
    #[serde(default)]
    pub ingestion: IngestionConfig,
    /// 시크릿 저장소 설정
    #[serde(default)]
    pub secrets: SecretsConfig,
}

impl BgpshipConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, BgpshipError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값으로 시작합니다.
    ///
    /// 기본 경로(`/etc/bgpship/bgpship.toml`)를 사용할 때만 호출됩니다.
    /// 명시적으로 지정된 파일은 [`load`](Self::load)를 사용해 누락을 에러로 처리합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, BgpshipError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(BgpshipError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, BgpshipError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BgpshipError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                BgpshipError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, BgpshipError> {
        toml::from_str(toml_str).map_err(|e| {
            BgpshipError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `BGPSHIP_{SECTION}_{FIELD}`
    /// 예: `BGPSHIP_INGESTION_TIMEOUT_SECS=10`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "BGPSHIP_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "BGPSHIP_GENERAL_LOG_FORMAT");

        // Rotation
        override_path(
            &mut self.rotation.active_path,
            "BGPSHIP_ROTATION_ACTIVE_PATH",
        );
        override_path(
            &mut self.rotation.staging_path,
            "BGPSHIP_ROTATION_STAGING_PATH",
        );
        override_path(
            &mut self.rotation.consolidated_path,
            "BGPSHIP_ROTATION_CONSOLIDATED_PATH",
        );

        // Reader
        override_parsed(&mut self.reader.kind, "BGPSHIP_READER_KIND");
        override_words(
            &mut self.reader.decoder_command,
            "BGPSHIP_READER_DECODER_COMMAND",
        );

        // Ingestion
        override_string(&mut self.ingestion.domain, "BGPSHIP_INGESTION_DOMAIN");
        override_string(
            &mut self.ingestion.api_version,
            "BGPSHIP_INGESTION_API_VERSION",
        );
        override_string(&mut self.ingestion.log_type, "BGPSHIP_INGESTION_LOG_TYPE");
        override_parsed(
            &mut self.ingestion.timeout_secs,
            "BGPSHIP_INGESTION_TIMEOUT_SECS",
        );
        override_parsed(
            &mut self.ingestion.max_body_bytes,
            "BGPSHIP_INGESTION_MAX_BODY_BYTES",
        );
        override_option_string(&mut self.ingestion.endpoint, "BGPSHIP_INGESTION_ENDPOINT");

        // Secrets
        override_parsed(&mut self.secrets.provider, "BGPSHIP_SECRETS_PROVIDER");
        override_option_string(&mut self.secrets.vault_name, "BGPSHIP_SECRETS_VAULT_NAME");
        override_string(
            &mut self.secrets.vault_domain,
            "BGPSHIP_SECRETS_VAULT_DOMAIN",
        );
        override_string(
            &mut self.secrets.workspace_id_secret,
            "BGPSHIP_SECRETS_WORKSPACE_ID_SECRET",
        );
        override_string(
            &mut self.secrets.shared_key_secret,
            "BGPSHIP_SECRETS_SHARED_KEY_SECRET",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    ///
    /// Key Vault 이름은 CLI 인자로도 주어질 수 있으므로 여기서 검사하지 않고,
    /// 시크릿 공급자를 생성하는 시점에 확인합니다.
    pub fn validate(&self) -> Result<(), BgpshipError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(invalid(
                "general.log_level",
                format!("must be one of: {}", valid_levels.join(", ")),
            ));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(invalid(
                "general.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        self.rotation.validate()?;

        if self.reader.kind == ReaderKind::Decoder && self.reader.decoder_command.is_empty() {
            return Err(invalid(
                "reader.decoder_command",
                "must not be empty when reader.kind is 'decoder'".to_owned(),
            ));
        }

        if self.ingestion.timeout_secs == 0 || self.ingestion.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(invalid(
                "ingestion.timeout_secs",
                format!("must be 1-{}", MAX_TIMEOUT_SECS),
            ));
        }

        if self.ingestion.max_body_bytes == 0 {
            return Err(invalid(
                "ingestion.max_body_bytes",
                "must be greater than 0".to_owned(),
            ));
        }

        if self.ingestion.log_type.is_empty()
            || !self
                .ingestion
                .log_type
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(invalid(
                "ingestion.log_type",
                "must be non-empty and contain only letters, digits and '_'".to_owned(),
            ));
        }

        if self.secrets.workspace_id_secret.is_empty() || self.secrets.shared_key_secret.is_empty()
        {
            return Err(invalid(
                "secrets",
                "secret names must not be empty".to_owned(),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> BgpshipError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason,
    }
    .into()
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 덤프 파일 로테이션 경로
///
/// 외부 라이터(BGP 데몬)가 `active_path`에 계속 기록하고,
/// 로테이션 시 `staging_path`로 넘긴 뒤 `consolidated_path`에 누적합니다.
/// `active_path`와 `staging_path`는 같은 파일시스템에 있어야 합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// 외부 라이터가 기록 중인 덤프 파일
    pub active_path: PathBuf,
    /// 전송 중인 덤프 사본
    pub staging_path: PathBuf,
    /// 추가 전용 누적 로그
    pub consolidated_path: PathBuf,
    /// 재생성된 active 파일의 권한 비트
    pub active_mode: u32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            active_path: PathBuf::from("/tmp/bird-mrtdump_bgp"),
            staging_path: PathBuf::from("/tmp/bird-mrtdump_bgp.tmp"),
            consolidated_path: PathBuf::from("/var/log/bird.mrt"),
            active_mode: 0o666,
        }
    }
}

impl RotationConfig {
    fn validate(&self) -> Result<(), BgpshipError> {
        let paths = [
            ("rotation.active_path", &self.active_path),
            ("rotation.staging_path", &self.staging_path),
            ("rotation.consolidated_path", &self.consolidated_path),
        ];
        for (field, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(invalid(field, "path must not be empty".to_owned()));
            }
        }

        if self.active_path == self.staging_path
            || self.active_path == self.consolidated_path
            || self.staging_path == self.consolidated_path
        {
            return Err(invalid(
                "rotation",
                "active, staging and consolidated paths must be distinct".to_owned(),
            ));
        }

        if self.active_mode > 0o7777 {
            return Err(invalid(
                "rotation.active_mode",
                format!("{:#o} is not a valid permission mode", self.active_mode),
            ));
        }

        Ok(())
    }
}

/// 덤프 리더 종류
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReaderKind {
    /// 외부 MRT 디코더 프로세스의 JSON lines 출력을 읽음 (기본값)
    #[default]
    Decoder,
    /// 이미 디코딩된 JSON lines 파일을 직접 읽음
    JsonLines,
}

impl FromStr for ReaderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "decoder" => Ok(Self::Decoder),
            "json_lines" => Ok(Self::JsonLines),
            other => Err(format!(
                "unknown reader kind '{}' (expected: decoder, json_lines)",
                other
            )),
        }
    }
}

impl fmt::Display for ReaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decoder => f.write_str("decoder"),
            Self::JsonLines => f.write_str("json_lines"),
        }
    }
}

/// 덤프 리더 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// 리더 종류
    pub kind: ReaderKind,
    /// 디코더 명령 (덤프 경로가 마지막 인자로 추가됨)
    pub decoder_command: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            kind: ReaderKind::Decoder,
            decoder_command: vec!["mrt2json".to_owned()],
        }
    }
}

/// 수집 엔드포인트 설정 (Azure Monitor HTTP Data Collector API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// 워크스페이스 ID 뒤에 붙는 도메인
    pub domain: String,
    /// `api-version` 쿼리 값
    pub api_version: String,
    /// `Log-Type` 헤더 값 (대상 테이블 이름)
    pub log_type: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 단일 요청 본문 크기 경고 기준 (바이트)
    pub max_body_bytes: usize,
    /// `https://{workspace}.{domain}` 대신 사용할 기본 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            domain: "ods.opinsights.azure.com".to_owned(),
            api_version: "2016-04-01".to_owned(),
            log_type: "BgpAnalytics".to_owned(),
            timeout_secs: 30,
            max_body_bytes: 30 * 1024 * 1024, // 30MB
            endpoint: None,
        }
    }
}

/// 시크릿 공급자 종류
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretProviderKind {
    /// Azure Key Vault (관리 ID 토큰 사용, 기본값)
    #[default]
    KeyVault,
    /// `BGPSHIP_SECRET_*` 환경변수
    Env,
}

impl FromStr for SecretProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "key_vault" | "key-vault" => Ok(Self::KeyVault),
            "env" => Ok(Self::Env),
            other => Err(format!(
                "unknown secret provider '{}' (expected: key_vault, env)",
                other
            )),
        }
    }
}

/// 시크릿 저장소 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    /// 시크릿 공급자
    pub provider: SecretProviderKind,
    /// Key Vault 이름 (`https://{vault_name}.{vault_domain}`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault_name: Option<String>,
    /// Key Vault 도메인
    pub vault_domain: String,
    /// 워크스페이스 ID 시크릿 이름
    pub workspace_id_secret: String,
    /// 공유 키 시크릿 이름
    pub shared_key_secret: String,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            provider: SecretProviderKind::KeyVault,
            vault_name: None,
            vault_domain: "vault.azure.net".to_owned(),
            workspace_id_secret: "bgp-logws-id".to_owned(),
            shared_key_secret: "bgp-logws-key".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_option_string(target: &mut Option<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = if val.is_empty() { None } else { Some(val) };
    }
}

fn override_path(target: &mut PathBuf, env_key: &str) {
    if let Some(val) = std::env::var_os(env_key) {
        *target = PathBuf::from(val);
    }
}

fn override_parsed<T>(target: &mut T, env_key: &str)
where
    T: FromStr,
    T::Err: fmt::Display,
{
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<T>() {
            Ok(parsed) => *target = parsed,
            Err(e) => warn!(
                env_key,
                value = val.as_str(),
                error = %e,
                "failed to parse env var, ignoring"
            ),
        }
    }
}

fn override_words(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val.split_whitespace().map(str::to_owned).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = BgpshipConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "json");
        assert_eq!(
            config.rotation.active_path,
            PathBuf::from("/tmp/bird-mrtdump_bgp")
        );
        assert_eq!(config.rotation.active_mode, 0o666);
        assert_eq!(config.ingestion.api_version, "2016-04-01");
        assert_eq!(config.secrets.workspace_id_secret, "bgp-logws-id");
        assert!(config.secrets.vault_name.is_none());
    }

    #[test]
    fn default_config_passes_validation() {
        let config = BgpshipConfig::default();
        config.validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = BgpshipConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.ingestion.log_type, "BgpAnalytics");
    }

    #[test]
    fn from_str_partial_toml_merges_with_defaults() {
        let toml = r#"
[rotation]
active_path = "/run/bird/dump"
active_mode = 0o660

[ingestion]
timeout_secs = 5
"#;
        let config = BgpshipConfig::parse(toml).unwrap();
        assert_eq!(config.rotation.active_path, PathBuf::from("/run/bird/dump"));
        assert_eq!(config.rotation.active_mode, 0o660);
        // staging_path는 기본값 유지
        assert_eq!(
            config.rotation.staging_path,
            PathBuf::from("/tmp/bird-mrtdump_bgp.tmp")
        );
        assert_eq!(config.ingestion.timeout_secs, 5);
        assert_eq!(config.ingestion.domain, "ods.opinsights.azure.com");
    }

    #[test]
    fn from_str_enums_use_snake_case() {
        let toml = r#"
[reader]
kind = "json_lines"

[secrets]
provider = "env"
"#;
        let config = BgpshipConfig::parse(toml).unwrap();
        assert_eq!(config.reader.kind, ReaderKind::JsonLines);
        assert_eq!(config.secrets.provider, SecretProviderKind::Env);
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let err = BgpshipConfig::parse("invalid = [[[toml").unwrap_err();
        assert!(matches!(
            err,
            BgpshipError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = BgpshipConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_same_active_and_staging() {
        let mut config = BgpshipConfig::default();
        config.rotation.staging_path = config.rotation.active_path.clone();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("distinct"));
    }

    #[test]
    fn validate_rejects_empty_decoder_command() {
        let mut config = BgpshipConfig::default();
        config.reader.decoder_command.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("decoder_command"));
    }

    #[test]
    fn validate_accepts_empty_decoder_command_for_json_lines() {
        let mut config = BgpshipConfig::default();
        config.reader.kind = ReaderKind::JsonLines;
        config.reader.decoder_command.clear();
        config.validate().unwrap();
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = BgpshipConfig::default();
        config.ingestion.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_log_type_with_spaces() {
        let mut config = BgpshipConfig::default();
        config.ingestion.log_type = "Bgp Analytics".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_type"));
    }

    #[test]
    fn validate_rejects_bad_mode() {
        let mut config = BgpshipConfig::default();
        config.rotation.active_mode = 0o17777;
        assert!(config.validate().is_err());
    }

    #[test]
    fn reader_kind_from_str() {
        assert_eq!(
            "json_lines".parse::<ReaderKind>().unwrap(),
            ReaderKind::JsonLines
        );
        assert!("mrtparse".parse::<ReaderKind>().is_err());
    }

    #[test]
    fn secret_provider_kind_accepts_dash() {
        assert_eq!(
            "key-vault".parse::<SecretProviderKind>().unwrap(),
            SecretProviderKind::KeyVault
        );
    }

    #[test]
    #[serial_test::serial]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_BGPSHIP_STR", "overridden") };
        override_string(&mut val, "TEST_BGPSHIP_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_BGPSHIP_STR") };
    }

    #[test]
    #[serial_test::serial]
    fn env_override_parsed_invalid_keeps_original() {
        let mut val = 30u64;
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_BGPSHIP_U64_BAD", "soon") };
        override_parsed(&mut val, "TEST_BGPSHIP_U64_BAD");
        assert_eq!(val, 30); // 원래 값 유지
        unsafe { std::env::remove_var("TEST_BGPSHIP_U64_BAD") };
    }

    #[test]
    #[serial_test::serial]
    fn env_override_empty_option_clears() {
        let mut val = Some("http://localhost:8080".to_owned());
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_BGPSHIP_OPT", "") };
        override_option_string(&mut val, "TEST_BGPSHIP_OPT");
        assert!(val.is_none());
        unsafe { std::env::remove_var("TEST_BGPSHIP_OPT") };
    }

    #[test]
    #[serial_test::serial]
    fn env_override_words_splits_command() {
        let mut val = vec!["mrt2json".to_owned()];
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_BGPSHIP_WORDS", "bgpdump  -m") };
        override_words(&mut val, "TEST_BGPSHIP_WORDS");
        assert_eq!(val, vec!["bgpdump", "-m"]);
        unsafe { std::env::remove_var("TEST_BGPSHIP_WORDS") };
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = BgpshipConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = BgpshipConfig::parse(&toml_str).unwrap();
        assert_eq!(config.rotation.active_path, parsed.rotation.active_path);
        assert_eq!(config.ingestion.timeout_secs, parsed.ingestion.timeout_secs);
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let err = BgpshipConfig::from_file("/nonexistent/path/bgpship.toml")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BgpshipError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn load_or_default_tolerates_missing_file() {
        let config = BgpshipConfig::load_or_default("/nonexistent/path/bgpship.toml")
            .await
            .unwrap();
        assert_eq!(config.ingestion.log_type, "BgpAnalytics");
    }
}
