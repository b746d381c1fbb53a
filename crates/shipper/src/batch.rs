//! 배치 조립 -- 레코드 스트림을 평탄화하여 하나의 JSON 배열 본문으로 만듭니다.
//!
//! 각 평탄화 레코드에는 원본 레코드의 압축 JSON 직렬화가 `raw` 키로 붙습니다.

use std::path::Path;

use bgpship_core::metrics as m;
use serde_json::Value;

use crate::error::ShipperError;
use crate::flatten::{FlatRecord, flatten_report};
use crate::reader::DumpReader;

/// 한 사이클의 평탄화 레코드 모음
#[derive(Debug, Clone, Default)]
pub struct Batch {
    records: Vec<FlatRecord>,
    dropped_keys: usize,
}

impl Batch {
    /// 빈 배치를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 원시 레코드를 평탄화하고 `raw`를 붙여 추가합니다.
    pub fn push_raw(&mut self, raw: &Value) -> Result<(), ShipperError> {
        let flattened = flatten_report(raw, None);
        let mut record = flattened.record;
        record.attach_raw(serde_json::to_string(raw)?);

        self.dropped_keys += flattened.dropped.len();
        self.records.push(record);
        metrics::counter!(m::RECORDS_FLATTENED_TOTAL).increment(1);
        Ok(())
    }

    /// 레코드 수
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 레코드가 없는지 여부
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 평탄화 중 누락된 키의 총 개수
    pub fn dropped_keys(&self) -> usize {
        self.dropped_keys
    }

    /// 레코드 목록
    pub fn records(&self) -> &[FlatRecord] {
        &self.records
    }

    /// 레코드 목록을 소유권과 함께 꺼냅니다.
    pub fn into_records(self) -> Vec<FlatRecord> {
        self.records
    }

    /// JSON 배열 본문으로 직렬화합니다.
    pub fn to_body(&self) -> Result<String, ShipperError> {
        Ok(serde_json::to_string(&self.records)?)
    }
}

/// 덤프 파일을 읽어 배치를 조립합니다.
///
/// 리더가 하나라도 에러를 내면 부분 배치 없이 즉시 실패합니다.
pub fn assemble(reader: &dyn DumpReader, path: &Path) -> Result<Batch, ShipperError> {
    let mut batch = Batch::new();
    for record in reader.read(path)? {
        batch.push_raw(&record?)?;
    }

    tracing::debug!(
        path = %path.display(),
        records = batch.len(),
        dropped_keys = batch.dropped_keys(),
        "batch assembled"
    );
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::JsonLinesReader;
    use serde_json::json;

    #[test]
    fn raw_is_compact_serialization_of_input() {
        let raw = json!({"type": [16, "BGP4MP"], "bgp_message": {"length": 23}});
        let mut batch = Batch::new();
        batch.push_raw(&raw).expect("push");

        let record = &batch.records()[0];
        assert_eq!(record.get("type"), Some(&json!("BGP4MP")));
        assert_eq!(record.get("bgp_message_length"), Some(&json!(23)));
        assert_eq!(
            record.get("raw"),
            Some(&json!(r#"{"type":[16,"BGP4MP"],"bgp_message":{"length":23}}"#))
        );
    }

    #[test]
    fn body_is_json_array_in_order() {
        let mut batch = Batch::new();
        batch.push_raw(&json!({"n": 1})).expect("push");
        batch.push_raw(&json!({"n": 2})).expect("push");

        let body: Value = serde_json::from_str(&batch.to_body().expect("body")).expect("json");
        let items = body.as_array().expect("array");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["n"], 1);
        assert_eq!(items[1]["n"], 2);
    }

    #[test]
    fn empty_batch_body() {
        assert_eq!(Batch::new().to_body().expect("body"), "[]");
    }

    #[test]
    fn counts_dropped_keys() {
        let mut batch = Batch::new();
        batch
            .push_raw(&json!({"as_path": [65001, 65002, 65003], "x": [1, 2, 3, 4]}))
            .expect("push");
        assert_eq!(batch.dropped_keys(), 2);
    }

    #[test]
    fn assemble_fails_without_partial_batch() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        std::fs::write(file.path(), "{\"a\":1}\n{broken\n").expect("write");

        let result = assemble(&JsonLinesReader::new(), file.path());
        assert!(matches!(result, Err(ShipperError::Read { .. })));
    }
}
