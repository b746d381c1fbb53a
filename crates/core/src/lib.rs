//! bgpship 공통 크레이트
//!
//! 설정, 에러 분류, 자격 증명, 시크릿 공급자 trait, 메트릭 이름을 정의합니다.
//! 덤프 처리 로직은 `bgpship-shipper`에 있습니다.

pub mod config;
pub mod error;
pub mod metrics;
pub mod secret;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{BgpshipError, ConfigError, SecretError};

// 설정
pub use config::BgpshipConfig;

// 시크릿 공급자 trait
pub use secret::SecretProvider;

// 도메인 타입
pub use types::Credentials;
