//! bgpship.toml 통합 설정 테스트
//!
//! - bgpship.toml.example 파싱 테스트
//! - 부분 설정 (일부 섹션만) 로딩 테스트
//! - 환경변수 우선순위 테스트
//! - 빈 파일 / 잘못된 형식 에러 테스트

use std::path::PathBuf;

use bgpship_core::config::{BgpshipConfig, ReaderKind, SecretProviderKind};
use bgpship_core::error::{BgpshipError, ConfigError};

const EXAMPLE: &str = include_str!("../../../bgpship.toml.example");

// =============================================================================
// bgpship.toml.example 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let config = BgpshipConfig::parse(EXAMPLE).expect("example config should parse");

    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.general.log_format, "json");
    assert_eq!(config.rotation.active_mode, 0o666);
    assert_eq!(config.reader.kind, ReaderKind::Decoder);
    assert_eq!(config.secrets.provider, SecretProviderKind::KeyVault);
}

#[test]
fn example_config_passes_validation() {
    let config = BgpshipConfig::parse(EXAMPLE).expect("should parse");
    config
        .validate()
        .expect("example config should pass validation");
}

#[test]
fn example_config_matches_code_defaults() {
    let example = BgpshipConfig::parse(EXAMPLE).expect("should parse");
    let defaults = BgpshipConfig::default();

    assert_eq!(example.rotation.active_path, defaults.rotation.active_path);
    assert_eq!(example.rotation.staging_path, defaults.rotation.staging_path);
    assert_eq!(
        example.rotation.consolidated_path,
        defaults.rotation.consolidated_path
    );
    assert_eq!(example.rotation.active_mode, defaults.rotation.active_mode);
    assert_eq!(example.reader.decoder_command, defaults.reader.decoder_command);
    assert_eq!(example.ingestion.domain, defaults.ingestion.domain);
    assert_eq!(example.ingestion.api_version, defaults.ingestion.api_version);
    assert_eq!(example.ingestion.log_type, defaults.ingestion.log_type);
    assert_eq!(example.ingestion.timeout_secs, defaults.ingestion.timeout_secs);
    assert_eq!(
        example.ingestion.max_body_bytes,
        defaults.ingestion.max_body_bytes
    );
    assert_eq!(example.ingestion.endpoint, defaults.ingestion.endpoint);
    assert_eq!(example.secrets.vault_name, defaults.secrets.vault_name);
    assert_eq!(example.secrets.vault_domain, defaults.secrets.vault_domain);
    assert_eq!(
        example.secrets.workspace_id_secret,
        defaults.secrets.workspace_id_secret
    );
    assert_eq!(
        example.secrets.shared_key_secret,
        defaults.secrets.shared_key_secret
    );
}

// =============================================================================
// 부분 설정 테스트
// =============================================================================

#[test]
fn partial_config_rotation_only() {
    let config = BgpshipConfig::parse(
        r#"
[rotation]
active_path = "/var/spool/bird/dump"
staging_path = "/var/spool/bird/dump.tmp"
"#,
    )
    .expect("should parse");

    assert_eq!(
        config.rotation.active_path,
        PathBuf::from("/var/spool/bird/dump")
    );
    assert_eq!(
        config.rotation.consolidated_path,
        PathBuf::from("/var/log/bird.mrt")
    );
    assert_eq!(config.ingestion.log_type, "BgpAnalytics");
}

#[test]
fn partial_config_reader_json_lines() {
    let config = BgpshipConfig::parse(
        r#"
[reader]
kind = "json_lines"
decoder_command = []
"#,
    )
    .expect("should parse");

    assert_eq!(config.reader.kind, ReaderKind::JsonLines);
    config
        .validate()
        .expect("json_lines needs no decoder command");
}

#[test]
fn partial_config_secrets_env_provider() {
    let config = BgpshipConfig::parse(
        r#"
[secrets]
provider = "env"
workspace_id_secret = "ws-id"
"#,
    )
    .expect("should parse");

    assert_eq!(config.secrets.provider, SecretProviderKind::Env);
    assert_eq!(config.secrets.workspace_id_secret, "ws-id");
    assert_eq!(config.secrets.shared_key_secret, "bgp-logws-key");
}

#[test]
fn partial_config_ingestion_endpoint() {
    let config = BgpshipConfig::parse(
        r#"
[ingestion]
endpoint = "http://127.0.0.1:8080"
timeout_secs = 5
"#,
    )
    .expect("should parse");

    assert_eq!(
        config.ingestion.endpoint.as_deref(),
        Some("http://127.0.0.1:8080")
    );
    assert_eq!(config.ingestion.timeout_secs, 5);
    assert_eq!(config.ingestion.api_version, "2016-04-01");
}

// =============================================================================
// 환경변수 우선순위 테스트
// =============================================================================

#[test]
#[serial_test::serial]
fn env_override_takes_precedence_over_toml() {
    let original = std::env::var("BGPSHIP_GENERAL_LOG_LEVEL").ok();

    // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("BGPSHIP_GENERAL_LOG_LEVEL", "error");
    }

    let mut config =
        BgpshipConfig::parse("[general]\nlog_level = \"debug\"\n").expect("should parse");
    config.apply_env_overrides();
    assert_eq!(config.general.log_level, "error");

    unsafe {
        match original {
            Some(val) => std::env::set_var("BGPSHIP_GENERAL_LOG_LEVEL", val),
            None => std::env::remove_var("BGPSHIP_GENERAL_LOG_LEVEL"),
        }
    }
}

#[test]
#[serial_test::serial]
fn env_override_vault_name_and_provider() {
    let original_name = std::env::var("BGPSHIP_SECRETS_VAULT_NAME").ok();
    let original_provider = std::env::var("BGPSHIP_SECRETS_PROVIDER").ok();

    // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("BGPSHIP_SECRETS_VAULT_NAME", "bgp-prod-vault");
        std::env::set_var("BGPSHIP_SECRETS_PROVIDER", "env");
    }

    let mut config = BgpshipConfig::default();
    config.apply_env_overrides();
    assert_eq!(config.secrets.vault_name.as_deref(), Some("bgp-prod-vault"));
    assert_eq!(config.secrets.provider, SecretProviderKind::Env);

    unsafe {
        match original_name {
            Some(val) => std::env::set_var("BGPSHIP_SECRETS_VAULT_NAME", val),
            None => std::env::remove_var("BGPSHIP_SECRETS_VAULT_NAME"),
        }
        match original_provider {
            Some(val) => std::env::set_var("BGPSHIP_SECRETS_PROVIDER", val),
            None => std::env::remove_var("BGPSHIP_SECRETS_PROVIDER"),
        }
    }
}

#[test]
#[serial_test::serial]
fn env_override_paths() {
    let original = std::env::var("BGPSHIP_ROTATION_ACTIVE_PATH").ok();

    // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("BGPSHIP_ROTATION_ACTIVE_PATH", "/srv/bird/dump");
    }

    let mut config = BgpshipConfig::parse(EXAMPLE).expect("should parse");
    config.apply_env_overrides();
    assert_eq!(config.rotation.active_path, PathBuf::from("/srv/bird/dump"));

    unsafe {
        match original {
            Some(val) => std::env::set_var("BGPSHIP_ROTATION_ACTIVE_PATH", val),
            None => std::env::remove_var("BGPSHIP_ROTATION_ACTIVE_PATH"),
        }
    }
}

// =============================================================================
// 에러 케이스
// =============================================================================

#[test]
fn empty_file_yields_defaults() {
    let config = BgpshipConfig::parse("").expect("empty config should parse");
    config.validate().expect("defaults should validate");
}

#[test]
fn malformed_toml_is_parse_error() {
    let err = BgpshipConfig::parse("[rotation\nactive_path = ").expect_err("malformed");
    assert!(matches!(
        err,
        BgpshipError::Config(ConfigError::ParseFailed { .. })
    ));
}

#[test]
fn unknown_reader_kind_is_parse_error() {
    let err = BgpshipConfig::parse("[reader]\nkind = \"bgpdump\"\n").expect_err("bad kind");
    assert!(matches!(
        err,
        BgpshipError::Config(ConfigError::ParseFailed { .. })
    ));
}

#[test]
fn overlapping_paths_fail_validation() {
    let config = BgpshipConfig::parse(
        r#"
[rotation]
active_path = "/tmp/dump"
staging_path = "/tmp/dump"
"#,
    )
    .expect("should parse");
    assert!(matches!(
        config.validate(),
        Err(BgpshipError::Config(ConfigError::InvalidValue { .. }))
    ));
}

#[tokio::test]
#[serial_test::serial]
async fn load_reads_file_and_validates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bgpship.toml");
    std::fs::write(&path, EXAMPLE).expect("write config");

    let config = BgpshipConfig::load(&path).await.expect("load");
    assert_eq!(config.ingestion.log_type, "BgpAnalytics");
}
