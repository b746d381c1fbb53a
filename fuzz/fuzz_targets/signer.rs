#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use bgpship_shipper::build_signature;

/// 퍼저용 서명 입력
#[derive(Arbitrary, Debug)]
struct FuzzSigningInput {
    workspace_id: String,
    shared_key: String,
    date: String,
    content_length: usize,
    content_type: String,
}

fuzz_target!(|input: FuzzSigningInput| {
    // 잘못된 base64 키는 에러로 끝나야 하며 패닉이 없어야 함
    if let Ok(signature) = build_signature(
        &input.workspace_id,
        &input.shared_key,
        &input.date,
        input.content_length,
        "POST",
        &input.content_type,
        "/api/logs",
    ) {
        assert!(signature.starts_with("SharedKey "));
    }
});
