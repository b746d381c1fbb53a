#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::Value;

use bgpship_shipper::flatten;

fuzz_target!(|data: &[u8]| {
    let Ok(tree) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    let record = flatten(&tree, None);
    for key in record.keys() {
        let value = record.get(key).expect("key from keys()");
        assert!(
            !value.is_object() && !value.is_array(),
            "non-scalar value under {}",
            key
        );
    }

    // 평탄화 결과를 다시 평탄화해도 그대로여야 함
    let flat = serde_json::to_value(&record).expect("flat record serializes");
    assert_eq!(flatten(&flat, None), record);
});
