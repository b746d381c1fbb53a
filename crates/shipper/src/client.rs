//! 수집 엔드포인트 HTTP 클라이언트
//!
//! 하나의 배치 본문을 서명된 `POST` 요청 한 번으로 전송합니다.
//! 재시도는 하지 않습니다. 주기적 재실행은 스케줄러의 몫입니다.
//!
//! 응답은 [`DeliveryOutcome`]으로 분류됩니다.
//! - 2xx: [`DeliveryOutcome::Delivered`]
//! - 그 외 상태 코드: [`DeliveryOutcome::Rejected`] (응답 본문 포함)
//! - 타임아웃, 연결 거부, DNS 실패: [`DeliveryOutcome::TransportFailed`]

use std::time::{Duration, Instant};

use bgpship_core::Credentials;
use bgpship_core::config::IngestionConfig;
use bgpship_core::metrics as m;
use chrono::Utc;
use serde::Serialize;

use crate::error::ShipperError;
use crate::signer::{self, SigningInput};

/// 수집 API 리소스 경로
pub const RESOURCE: &str = "/api/logs";

/// 요청 콘텐츠 타입
pub const CONTENT_TYPE: &str = "application/json";

const METHOD: &str = "POST";

/// 전송 결과
///
/// 거부와 네트워크 실패는 에러가 아닌 결과로 보고됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    /// 2xx 응답
    Delivered { status: u16 },
    /// 2xx 이외의 응답
    Rejected { status: u16, body: String },
    /// 응답을 받지 못함
    TransportFailed { cause: String },
}

impl DeliveryOutcome {
    /// 전송 성공 여부
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }

    /// 메트릭 레이블 값
    pub fn label(&self) -> &'static str {
        match self {
            Self::Delivered { .. } => "delivered",
            Self::Rejected { .. } => "rejected",
            Self::TransportFailed { .. } => "transport_failed",
        }
    }
}

/// 수집 엔드포인트 클라이언트
///
/// 실행당 한 번 생성되며 자격 증명을 소유합니다.
pub struct IngestionClient {
    http: reqwest::Client,
    credentials: Credentials,
    base_url: String,
    api_version: String,
    max_body_bytes: usize,
}

impl IngestionClient {
    /// 설정과 자격 증명으로 클라이언트를 생성합니다.
    ///
    /// `endpoint`가 없으면 `https://{workspace_id}.{domain}`을 사용합니다.
    pub fn new(credentials: Credentials, config: &IngestionConfig) -> Result<Self, ShipperError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = match &config.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_owned(),
            None => format!("https://{}.{}", credentials.workspace_id(), config.domain),
        };

        Ok(Self {
            http,
            credentials,
            base_url,
            api_version: config.api_version.clone(),
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// 요청 URL (쿼리 포함)
    pub fn url(&self) -> String {
        format!(
            "{}{}?api-version={}",
            self.base_url, RESOURCE, self.api_version
        )
    }

    /// 배치 본문을 전송합니다.
    ///
    /// # Errors
    ///
    /// 서명 실패만 에러로 반환합니다. HTTP 결과는 [`DeliveryOutcome`]입니다.
    pub async fn post(
        &self,
        body: String,
        log_type: &str,
    ) -> Result<DeliveryOutcome, ShipperError> {
        let content_length = body.len();
        if content_length > self.max_body_bytes {
            tracing::warn!(
                body_bytes = content_length,
                limit = self.max_body_bytes,
                "batch exceeds the per-post size limit, sending anyway"
            );
        }

        let date = signer::rfc1123_date(Utc::now());
        let authorization = signer::sign(
            self.credentials.workspace_id(),
            self.credentials.shared_key(),
            &SigningInput {
                method: METHOD,
                content_length,
                content_type: CONTENT_TYPE,
                date: &date,
                resource: RESOURCE,
            },
        )?;

        let url = self.url();
        tracing::debug!(url = %url, body_bytes = content_length, log_type, "posting batch");

        let started = Instant::now();
        let result = self
            .http
            .post(&url)
            .header("content-type", CONTENT_TYPE)
            .header("Authorization", authorization)
            .header("Log-Type", log_type)
            .header("x-ms-date", &date)
            .body(body)
            .send()
            .await;

        let outcome = match result {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    DeliveryOutcome::Delivered {
                        status: status.as_u16(),
                    }
                } else {
                    let body = match resp.text().await {
                        Ok(text) => text,
                        Err(e) => format!("<unreadable response body: {}>", e),
                    };
                    DeliveryOutcome::Rejected {
                        status: status.as_u16(),
                        body,
                    }
                }
            }
            Err(e) => DeliveryOutcome::TransportFailed {
                cause: e.to_string(),
            },
        };

        metrics::histogram!(m::DELIVERY_DURATION_SECONDS).record(started.elapsed().as_secs_f64());
        metrics::counter!(m::DELIVERIES_TOTAL, m::LABEL_RESULT => outcome.label()).increment(1);

        Ok(outcome)
    }
}

impl std::fmt::Debug for IngestionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestionClient")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("credentials", &self.credentials)
            .finish()
    }
}
