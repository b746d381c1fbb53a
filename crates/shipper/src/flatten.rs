//! 레코드 평탄화
//!
//! 덤프 리더가 만든 임의 깊이의 레코드 트리를 단일 레벨 키-스칼라 매핑으로 변환합니다.
//! 수집 엔드포인트는 1단계 JSON 객체만 컬럼으로 인식하기 때문입니다.
//!
//! # 규칙
//! - 매핑: 키 경로를 `_`로 연결 (`{"a":{"b":1}}` -> `a_b`)
//! - 매핑 리스트: 인덱스를 경로에 포함 (`{"a":[{"x":1}]}` -> `a_0_x`)
//! - 스칼라 리스트: 1개면 그 값, 2개면 **마지막** 값(이전/이후 쌍), 3개 이상은 키 누락
//! - 스칼라: 그대로
//!
//! 평탄화기는 노드 종류만 보고 동작하며 라우팅 프로토콜 의미는 알지 못합니다.
//! 입력을 변경하지 않고, 유한한 트리에서 항상 종료합니다.
//!
//! # 사용 예시
//! ```
//! use bgpship_shipper::flatten::flatten;
//! use serde_json::json;
//!
//! let record = flatten(&json!({"a": {"b": 1, "c": [2, 3]}}), None);
//! assert_eq!(record.get("a_b"), Some(&json!(1)));
//! assert_eq!(record.get("a_c"), Some(&json!(3)));
//! ```

use std::fmt;

use bgpship_core::metrics as m;
use serde::Serialize;
use serde_json::{Map, Value};

/// 감사용 원본 레코드가 저장되는 예약 키
pub const RAW_KEY: &str = "raw";

/// 평탄화된 레코드 -- 키에서 스칼라 값으로의 순서 있는 매핑
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlatRecord(Map<String, Value>);

impl FlatRecord {
    /// 키에 해당하는 값을 반환합니다.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// 키 존재 여부
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// 필드 수
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 필드가 없는지 여부
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 삽입 순서대로 키를 순회합니다.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// 원본 레코드의 직렬화 문자열을 `raw` 키에 붙입니다.
    ///
    /// 평탄화 결과에 같은 키가 있더라도 원본이 우선합니다.
    pub fn attach_raw(&mut self, raw: String) {
        self.0.insert(RAW_KEY.to_owned(), Value::String(raw));
    }

    /// 내부 매핑을 꺼냅니다.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    fn insert(&mut self, key: String, value: Value) {
        // 트리 구조상 충돌은 없어야 하지만, 발생하면 마지막 값이 이깁니다.
        self.0.insert(key, value);
    }
}

/// 키가 누락된 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// 스칼라가 3개 이상인 리스트 (알려진 커버리지 공백)
    TooManyScalars(usize),
    /// 매핑과 스칼라(또는 중첩 리스트)가 섞인 리스트
    MixedList,
    /// 접두어 없이 최상위에서 만난 스칼라
    EmptyKey,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyScalars(n) => write!(f, "list with {} scalar elements", n),
            Self::MixedList => f.write_str("list mixing mappings and scalars"),
            Self::EmptyKey => f.write_str("scalar without a key"),
        }
    }
}

/// 평탄화 중 누락된 키 진단
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedKey {
    /// 누락된 키 경로
    pub key: String,
    /// 누락 사유
    pub reason: DropReason,
}

/// 평탄화 결과와 진단 목록
#[derive(Debug, Clone, Default)]
pub struct Flattened {
    /// 평탄화된 레코드
    pub record: FlatRecord,
    /// 누락된 키 목록
    pub dropped: Vec<DroppedKey>,
}

/// 레코드 트리를 평탄화합니다.
///
/// 누락된 키는 `warn` 로그로만 보고됩니다. 진단 목록이 필요하면
/// [`flatten_report`]를 사용하세요.
pub fn flatten(node: &Value, prefix: Option<&str>) -> FlatRecord {
    flatten_report(node, prefix).record
}

/// 레코드 트리를 평탄화하고 누락된 키 목록을 함께 반환합니다.
pub fn flatten_report(node: &Value, prefix: Option<&str>) -> Flattened {
    let mut out = Flattened::default();
    walk(node, prefix.unwrap_or(""), &mut out);
    out
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{}_{}", prefix, segment)
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn walk(node: &Value, prefix: &str, out: &mut Flattened) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                walk(child, &join(prefix, key), out);
            }
        }
        Value::Array(items) => walk_list(items, prefix, out),
        scalar => emit(prefix, scalar, out),
    }
}

fn walk_list(items: &[Value], prefix: &str, out: &mut Flattened) {
    if items.is_empty() {
        return;
    }

    if items.iter().all(Value::is_object) {
        for (index, item) in items.iter().enumerate() {
            walk(item, &join(prefix, &index.to_string()), out);
        }
        return;
    }

    if !items.iter().all(is_scalar) {
        drop_key(prefix, DropReason::MixedList, out);
        return;
    }

    match items {
        [only] => emit(prefix, only, out),
        // 2개짜리 스칼라 리스트는 이전/이후 쌍으로 보고 뒤쪽 값을 사용
        [_, last] => emit(prefix, last, out),
        _ => drop_key(prefix, DropReason::TooManyScalars(items.len()), out),
    }
}

fn emit(key: &str, value: &Value, out: &mut Flattened) {
    if key.is_empty() {
        drop_key(key, DropReason::EmptyKey, out);
        return;
    }
    out.record.insert(key.to_owned(), value.clone());
}

fn drop_key(key: &str, reason: DropReason, out: &mut Flattened) {
    tracing::warn!(key, reason = %reason, "dropping key that cannot be flattened");
    metrics::counter!(m::KEYS_DROPPED_TOTAL).increment(1);
    out.dropped.push(DroppedKey {
        key: key.to_owned(),
        reason,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn nested_mapping_and_two_element_list() {
        let record = flatten(&json!({"a": {"b": 1, "c": [2, 3]}}), None);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("a_b"), Some(&json!(1)));
        assert_eq!(record.get("a_c"), Some(&json!(3)));
    }

    #[test]
    fn list_of_mappings_uses_indices() {
        let record = flatten(&json!({"a": [{"x": 1}, {"x": 2}]}), None);
        assert_eq!(record.get("a_0_x"), Some(&json!(1)));
        assert_eq!(record.get("a_1_x"), Some(&json!(2)));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn three_scalars_are_dropped_with_diagnostic() {
        let out = flatten_report(&json!({"a": [1, 2, 3], "b": "kept"}), None);
        assert!(!out.record.contains_key("a"));
        assert_eq!(out.record.get("b"), Some(&json!("kept")));
        assert_eq!(
            out.dropped,
            vec![DroppedKey {
                key: "a".to_owned(),
                reason: DropReason::TooManyScalars(3),
            }]
        );
    }

    #[test]
    fn single_scalar_list_emits_element() {
        let record = flatten(&json!({"peer_as": [65001]}), None);
        assert_eq!(record.get("peer_as"), Some(&json!(65001)));
    }

    #[test]
    fn empty_list_is_omitted() {
        let out = flatten_report(&json!({"withdrawn_routes": [], "length": 23}), None);
        assert!(!out.record.contains_key("withdrawn_routes"));
        assert!(out.dropped.is_empty());
        assert_eq!(out.record.len(), 1);
    }

    #[test]
    fn empty_mapping_contributes_nothing() {
        let record = flatten(&json!({"attrs": {}, "type": 16}), None);
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["type"]);
    }

    #[test]
    fn mixed_list_is_dropped() {
        let out = flatten_report(&json!({"a": [{"x": 1}, 2]}), None);
        assert!(out.record.is_empty());
        assert_eq!(out.dropped[0].reason, DropReason::MixedList);
    }

    #[test]
    fn nested_scalar_lists_are_dropped() {
        let out = flatten_report(&json!({"a": [[1, 2]]}), None);
        assert!(out.record.is_empty());
        assert_eq!(out.dropped[0].reason, DropReason::MixedList);
    }

    #[test]
    fn prefix_is_prepended() {
        let record = flatten(&json!({"b": true, "c": null}), Some("bgp"));
        assert_eq!(record.get("bgp_b"), Some(&json!(true)));
        assert_eq!(record.get("bgp_c"), Some(&Value::Null));
    }

    #[test]
    fn root_scalar_without_prefix_is_dropped() {
        let out = flatten_report(&json!(42), None);
        assert!(out.record.is_empty());
        assert_eq!(out.dropped[0].reason, DropReason::EmptyKey);
    }

    #[test]
    fn root_list_of_mappings_starts_at_index() {
        let record = flatten(&json!([{"x": 1}]), None);
        assert_eq!(record.get("0_x"), Some(&json!(1)));
    }

    #[test]
    fn preserves_insertion_order() {
        let record = flatten(
            &json!({"timestamp": [1700000000, 0], "type": [16, "BGP4MP"], "subtype": [4, "MESSAGE_AS4"]}),
            None,
        );
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["timestamp", "type", "subtype"]
        );
        assert_eq!(record.get("type"), Some(&json!("BGP4MP")));
    }

    #[test]
    fn key_collision_keeps_last_value() {
        // "a_b" 키가 직접 키와 경로 키 양쪽에서 생성됨
        let record = flatten(&json!({"a_b": 1, "a": {"b": 2}}), None);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("a_b"), Some(&json!(2)));
    }

    #[test]
    fn attach_raw_overrides_flattened_raw_key() {
        let mut record = flatten(&json!({"raw": "flattened"}), None);
        record.attach_raw("{\"raw\":\"flattened\"}".to_owned());
        assert_eq!(
            record.get(RAW_KEY),
            Some(&json!("{\"raw\":\"flattened\"}"))
        );
    }

    #[test]
    fn does_not_mutate_input() {
        let input = json!({"a": [{"x": 1}], "b": [1, 2, 3]});
        let before = input.clone();
        let _ = flatten(&input, None);
        assert_eq!(input, before);
    }

    fn arb_tree() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-z0-9]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(5, 64, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::vec(("[a-z]{1,4}", inner), 0..4)
                    .prop_map(|entries| Value::Object(entries.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn flatten_is_idempotent(tree in arb_tree()) {
            let once = flatten(&tree, None);
            let twice = flatten(&Value::Object(once.clone().into_inner()), None);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn flattened_values_are_scalars(tree in arb_tree()) {
            let record = flatten(&tree, None);
            for value in record.clone().into_inner().values() {
                prop_assert!(is_scalar(value));
            }
            for key in record.keys() {
                prop_assert!(!key.is_empty());
            }
        }
    }
}
