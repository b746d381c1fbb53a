//! 메트릭 상수
//!
//! 모든 메트릭의 이름을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()`, `metrics::histogram!()`
//! 매크로를 호출합니다. 익스포터는 설치하지 않으므로, 이 크레이트를 임베딩하는
//! 프로세스가 recorder를 설치한 경우에만 값이 수집됩니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `bgpship_`
//! - 접미어: `_total` (counter), `_seconds` (histogram/latency), `_bytes` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(bgpship_core::metrics::RECORDS_FLATTENED_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 결과 레이블 키 (delivered, rejected, transport_failed)
pub const LABEL_RESULT: &str = "result";

/// 로테이션 전략 레이블 키 (exchange, rename_then_create)
pub const LABEL_STRATEGY: &str = "strategy";

// ─── 로테이션 ──────────────────────────────────────────────────────

/// 로테이션된 덤프 파일 수 (counter, label: strategy)
pub const ROTATIONS_TOTAL: &str = "bgpship_rotations_total";

/// 누적 로그에 추가된 바이트 수 (counter)
pub const ROTATED_BYTES: &str = "bgpship_rotated_bytes";

/// 비어 있어 건너뛴 사이클 수 (counter)
pub const CYCLES_SKIPPED_TOTAL: &str = "bgpship_cycles_skipped_total";

// ─── 평탄화 ────────────────────────────────────────────────────────

/// 평탄화된 레코드 수 (counter)
pub const RECORDS_FLATTENED_TOTAL: &str = "bgpship_records_flattened_total";

/// 평탄화 중 누락된 키 수 (counter)
pub const KEYS_DROPPED_TOTAL: &str = "bgpship_keys_dropped_total";

// ─── 전송 ──────────────────────────────────────────────────────────

/// 배치 전송 시도 수 (counter, label: result)
pub const DELIVERIES_TOTAL: &str = "bgpship_deliveries_total";

/// 배치 전송 지연 시간 (histogram, 초)
pub const DELIVERY_DURATION_SECONDS: &str = "bgpship_delivery_duration_seconds";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더를 설치한 임베딩 프로세스가 설치 직후 한 번 호출합니다.
/// 레코더가 없으면 아무 일도 하지 않습니다.
pub fn describe_all() {
    use metrics::{Unit, describe_counter, describe_histogram};

    describe_counter!(
        ROTATIONS_TOTAL,
        "Number of dump files handed off from the active path"
    );
    describe_counter!(
        ROTATED_BYTES,
        Unit::Bytes,
        "Bytes appended to the consolidated log"
    );
    describe_counter!(
        CYCLES_SKIPPED_TOTAL,
        "Cycles skipped because the active dump was empty"
    );
    describe_counter!(RECORDS_FLATTENED_TOTAL, "Records flattened into a batch");
    describe_counter!(
        KEYS_DROPPED_TOTAL,
        "Keys dropped while flattening (long or mixed lists)"
    );
    describe_counter!(DELIVERIES_TOTAL, "Batch posts by delivery result");
    describe_histogram!(
        DELIVERY_DURATION_SECONDS,
        Unit::Seconds,
        "Time spent posting a batch to the ingestion endpoint"
    );
}
