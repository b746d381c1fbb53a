//! 덤프 전송 오케스트레이션 -- 로테이션/읽기/평탄화/조립/전송의 한 사이클을 관리합니다.
//!
//! [`DumpShipper`]는 실행당 한 번 [`ship`](DumpShipper::ship)을 호출하는 단발성 파이프라인입니다.
//! 주기적 재실행은 외부 스케줄러가 담당합니다.
//!
//! # 상태 전이
//! ```text
//! Idle -> Rotated -> Read -> Flattened -> Assembled -> Shipped
//!   |                                        |
//!   +-> Skipped (빈 활성 파일)                +-> DryRunPrinted
//! ```
//!
//! 파일 작업(로테이션, 읽기, 평탄화, 조립)은 블로킹 스레드에서 실행되고
//! 전송만 비동기로 수행됩니다.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bgpship_core::BgpshipConfig;
use bgpship_core::config::{ReaderConfig, RotationConfig};
use serde::Serialize;

use crate::batch::{self, Batch};
use crate::client::{DeliveryOutcome, IngestionClient};
use crate::error::ShipperError;
use crate::reader::{self, DumpReader};
use crate::rotation::{RotationOutcome, Rotator};

/// 한 사이클의 진행 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipState {
    /// 시작 전
    Idle,
    /// 활성 파일이 스테이징으로 넘어감
    Rotated,
    /// 덤프 읽기 완료
    Read,
    /// 모든 레코드 평탄화 완료
    Flattened,
    /// JSON 배열 본문 조립 완료
    Assembled,
    /// 전송 완료 (결과와 무관)
    Shipped,
    /// 드라이런 출력 완료
    DryRunPrinted,
    /// 빈 활성 파일로 건너뜀
    Skipped,
}

impl fmt::Display for ShipState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Rotated => "rotated",
            Self::Read => "read",
            Self::Flattened => "flattened",
            Self::Assembled => "assembled",
            Self::Shipped => "shipped",
            Self::DryRunPrinted => "dry_run_printed",
            Self::Skipped => "skipped",
        };
        f.write_str(name)
    }
}

fn advance(from: ShipState, to: ShipState) -> ShipState {
    tracing::debug!(from = %from, to = %to, "ship state transition");
    to
}

/// 전송 방식
#[derive(Debug)]
pub enum Delivery {
    /// 본문만 조립하고 전송하지 않음 (출력은 호출자 몫)
    DryRun,
    /// 수집 엔드포인트로 전송
    Live(IngestionClient),
}

/// 한 사이클의 결과 보고
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ShipReport {
    /// 활성 파일이 비어 있어 아무것도 하지 않음
    Skipped,
    /// 로테이션했지만 레코드가 없어 전송하지 않음
    NoRecords { rotated_bytes: u64 },
    /// 드라이런 완료, `body`는 호출자가 출력
    DryRunPrinted {
        records: usize,
        dropped_keys: usize,
        #[serde(skip)]
        body: String,
    },
    /// 전송 시도 완료
    Shipped {
        records: usize,
        dropped_keys: usize,
        body_bytes: usize,
        outcome: DeliveryOutcome,
    },
}

/// 블로킹 단계의 결과
enum Prepared {
    Skipped,
    NoRecords { rotated_bytes: u64 },
    Ready { batch: Batch, body: String },
}

/// 덤프 전송기
pub struct DumpShipper {
    rotator: Rotator,
    reader: Arc<dyn DumpReader>,
    delivery: Delivery,
    log_type: String,
}

impl DumpShipper {
    /// 빌더를 생성합니다.
    pub fn builder() -> DumpShipperBuilder {
        DumpShipperBuilder::new()
    }

    /// 드라이런 여부
    pub fn is_dry_run(&self) -> bool {
        matches!(self.delivery, Delivery::DryRun)
    }

    /// 로테이터
    pub fn rotator(&self) -> &Rotator {
        &self.rotator
    }

    /// 한 사이클을 실행합니다.
    ///
    /// # Errors
    ///
    /// 로테이션, 읽기, 서명, 직렬화 실패는 에러입니다. 전송 거부와 네트워크 실패는
    /// [`ShipReport::Shipped`]의 `outcome`으로 보고됩니다.
    pub async fn ship(&self) -> Result<ShipReport, ShipperError> {
        let rotator = self.rotator.clone();
        let reader = Arc::clone(&self.reader);

        let prepared = tokio::task::spawn_blocking(move || prepare(&rotator, reader.as_ref()))
            .await
            .map_err(|e| ShipperError::Task(e.to_string()))??;

        let (batch, body) = match prepared {
            Prepared::Skipped => {
                tracing::info!("active dump is empty, skipping cycle");
                return Ok(ShipReport::Skipped);
            }
            Prepared::NoRecords { rotated_bytes } => {
                tracing::warn!(rotated_bytes, "rotated dump produced no records, nothing to send");
                return Ok(ShipReport::NoRecords { rotated_bytes });
            }
            Prepared::Ready { batch, body } => (batch, body),
        };

        match &self.delivery {
            Delivery::DryRun => {
                advance(ShipState::Assembled, ShipState::DryRunPrinted);
                tracing::info!(records = batch.len(), "dry run, batch not sent");
                Ok(ShipReport::DryRunPrinted {
                    records: batch.len(),
                    dropped_keys: batch.dropped_keys(),
                    body,
                })
            }
            Delivery::Live(client) => {
                let body_bytes = body.len();
                let outcome = client.post(body, &self.log_type).await?;
                advance(ShipState::Assembled, ShipState::Shipped);
                log_outcome(&outcome, batch.len());
                Ok(ShipReport::Shipped {
                    records: batch.len(),
                    dropped_keys: batch.dropped_keys(),
                    body_bytes,
                    outcome,
                })
            }
        }
    }

    /// 로테이션/전송 없이 임의의 덤프 파일을 평탄화합니다.
    pub async fn inspect(&self, path: impl Into<PathBuf>) -> Result<Batch, ShipperError> {
        inspect(Arc::clone(&self.reader), path.into()).await
    }
}

impl fmt::Debug for DumpShipper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DumpShipper")
            .field("rotator", &self.rotator)
            .field("reader", &self.reader.name())
            .field("delivery", &self.delivery)
            .field("log_type", &self.log_type)
            .finish()
    }
}

/// 로테이션/전송 없이 덤프 파일을 읽어 배치를 조립합니다.
///
/// 읽기 실패 후 보존된 스테이징 파일을 점검할 때 사용합니다.
pub async fn inspect(reader: Arc<dyn DumpReader>, path: PathBuf) -> Result<Batch, ShipperError> {
    tokio::task::spawn_blocking(move || batch::assemble(reader.as_ref(), &path))
        .await
        .map_err(|e| ShipperError::Task(e.to_string()))?
}

fn prepare(rotator: &Rotator, reader: &dyn DumpReader) -> Result<Prepared, ShipperError> {
    let state = ShipState::Idle;

    let rotated_bytes = match rotator.rotate()? {
        RotationOutcome::Empty => {
            advance(state, ShipState::Skipped);
            return Ok(Prepared::Skipped);
        }
        RotationOutcome::Rotated { bytes, .. } => bytes,
    };
    let state = advance(state, ShipState::Rotated);

    let staging: &Path = rotator.staging_path();
    let batch = batch::assemble(reader, staging).inspect_err(|e| {
        tracing::error!(
            path = %staging.display(),
            error = %e,
            "dump read failed, staging file preserved"
        );
    })?;
    let state = advance(state, ShipState::Read);
    let state = advance(state, ShipState::Flattened);

    if batch.is_empty() {
        return Ok(Prepared::NoRecords { rotated_bytes });
    }

    let body = batch.to_body()?;
    advance(state, ShipState::Assembled);
    Ok(Prepared::Ready { batch, body })
}

fn log_outcome(outcome: &DeliveryOutcome, records: usize) {
    match outcome {
        DeliveryOutcome::Delivered { status } => {
            tracing::info!(status, records, "batch delivered");
        }
        DeliveryOutcome::Rejected { status, body } => {
            tracing::error!(status, body = %body, records, "batch rejected by ingestion endpoint");
        }
        DeliveryOutcome::TransportFailed { cause } => {
            tracing::error!(cause = %cause, records, "batch delivery failed");
        }
    }
}

/// 덤프 전송기 빌더
pub struct DumpShipperBuilder {
    rotation: RotationConfig,
    reader_config: ReaderConfig,
    reader: Option<Arc<dyn DumpReader>>,
    rotator: Option<Rotator>,
    delivery: Delivery,
    log_type: String,
}

impl DumpShipperBuilder {
    /// 기본 설정으로 빌더를 생성합니다. 기본 전송 방식은 드라이런입니다.
    pub fn new() -> Self {
        let defaults = BgpshipConfig::default();
        Self {
            rotation: defaults.rotation,
            reader_config: defaults.reader,
            reader: None,
            rotator: None,
            delivery: Delivery::DryRun,
            log_type: defaults.ingestion.log_type,
        }
    }

    /// 전체 설정에서 로테이션, 리더, 로그 타입을 가져옵니다.
    pub fn config(mut self, config: &BgpshipConfig) -> Self {
        self.rotation = config.rotation.clone();
        self.reader_config = config.reader.clone();
        self.log_type = config.ingestion.log_type.clone();
        self
    }

    /// 리더를 직접 지정합니다.
    pub fn reader(mut self, reader: Arc<dyn DumpReader>) -> Self {
        self.reader = Some(reader);
        self
    }

    /// 로테이터를 직접 지정합니다.
    pub fn rotator(mut self, rotator: Rotator) -> Self {
        self.rotator = Some(rotator);
        self
    }

    /// 전송 방식을 지정합니다.
    pub fn delivery(mut self, delivery: Delivery) -> Self {
        self.delivery = delivery;
        self
    }

    /// 수집 로그 타입을 지정합니다.
    pub fn log_type(mut self, log_type: impl Into<String>) -> Self {
        self.log_type = log_type.into();
        self
    }

    /// 전송기를 빌드합니다.
    pub fn build(self) -> Result<DumpShipper, ShipperError> {
        let reader = match self.reader {
            Some(reader) => reader,
            None => Arc::from(reader::reader_from_config(&self.reader_config)?),
        };
        let rotator = self
            .rotator
            .unwrap_or_else(|| Rotator::from_config(&self.rotation));

        Ok(DumpShipper {
            rotator,
            reader,
            delivery: self.delivery,
            log_type: self.log_type,
        })
    }
}

impl Default for DumpShipperBuilder {
    fn default() -> Self {
        Self::new()
    }
}
