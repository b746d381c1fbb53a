//! bgpship 덤프 전송 파이프라인
//!
//! BGP 데몬이 기록하는 MRT 덤프 파일을 로테이션하고, 레코드를 평탄화하여
//! 로그 분석 수집 API로 서명된 요청 한 번에 전송합니다.
//!
//! # 모듈 구성
//!
//! - [`rotation`]: 활성 덤프 파일의 원자적 로테이션과 누적 로그 추가
//! - [`reader`]: 덤프 파일을 원시 레코드 스트림으로 읽는 리더 (JSON lines, 외부 디코더)
//! - [`flatten`]: 중첩 레코드를 단일 레벨 키-스칼라 매핑으로 평탄화
//! - [`batch`]: 평탄화 레코드를 JSON 배열 본문으로 조립
//! - [`signer`]: HMAC-SHA256 SharedKey 요청 서명
//! - [`client`]: 수집 엔드포인트 HTTP 클라이언트
//! - [`secrets`]: Key Vault / 환경변수 시크릿 공급자와 자격 증명 조회
//! - [`shipper`]: 한 사이클 오케스트레이션 (상태 전이, 드라이런)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! active dump -> Rotator -> staging -> DumpReader -> flatten -> Batch -> IngestionClient
//!                  |                                                        |
//!            consolidated log                                      SharedKey signer
//! ```

pub mod batch;
pub mod client;
pub mod error;
pub mod flatten;
pub mod reader;
pub mod rotation;
pub mod secrets;
pub mod shipper;
pub mod signer;

// --- 주요 타입 re-export ---

// 오케스트레이션
pub use shipper::{Delivery, DumpShipper, DumpShipperBuilder, ShipReport, ShipState};

// 에러
pub use error::ShipperError;

// 평탄화
pub use flatten::{DropReason, DroppedKey, FlatRecord, Flattened, flatten, flatten_report};

// 배치
pub use batch::Batch;

// 전송
pub use client::{DeliveryOutcome, IngestionClient};
pub use signer::{build_signature, rfc1123_date};

// 로테이션
pub use rotation::{RotationOutcome, RotationStrategy, Rotator};

// 리더
pub use reader::{
    DecoderCommandReader, DumpReader, JsonLinesReader, RecordStream, reader_from_config,
};

// 시크릿
pub use secrets::{EnvSecretProvider, KeyVaultSecretProvider, fetch_credentials};
