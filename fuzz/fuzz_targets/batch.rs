#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::Value;

use bgpship_shipper::Batch;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut batch = Batch::new();
    for line in text.lines() {
        if let Ok(record) = serde_json::from_str::<Value>(line) {
            let _ = batch.push_raw(&record);
        }
    }

    // 본문은 항상 레코드 수만큼의 원소를 가진 JSON 배열
    let body = batch.to_body().expect("batch serializes");
    let parsed: Vec<Value> = serde_json::from_str(&body).expect("body is a JSON array");
    assert_eq!(parsed.len(), batch.len());
});
