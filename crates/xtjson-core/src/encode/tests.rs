use super::*;
use crate::{
    config::{DEFAULT_MAX_DEPTH, OutputStyle},
    domain::{Query, QueryTail, ToJson, TxOp},
    error::{ErrorClass, ErrorOrigin},
    value::ValueMap,
};
use proptest::prelude::*;
use serde_json::json;

// ---- fixtures ----------------------------------------------------------

#[derive(Debug)]
struct PutFixture;

impl ToJson for PutFixture {
    fn to_json(&self) -> Value {
        Value::map([("put", Value::map([("id", 1)]))])
    }
}

impl TxOp for PutFixture {}

#[derive(Debug)]
struct LimitFixture;

impl ToJson for LimitFixture {
    fn to_json(&self) -> Value {
        Value::from("limit:10")
    }
}

impl QueryTail for LimitFixture {}

#[derive(Debug)]
struct TailListQuery;

impl ToJson for TailListQuery {
    fn to_json(&self) -> Value {
        Value::List(vec![Value::query_tail(LimitFixture)])
    }
}

impl Query for TailListQuery {}

// Violates the acyclic contract: converts to a tree containing itself.
#[derive(Debug)]
struct SelfReferentialQuery;

impl ToJson for SelfReferentialQuery {
    fn to_json(&self) -> Value {
        Value::List(vec![Value::query(Self)])
    }
}

impl Query for SelfReferentialQuery {}

#[derive(Debug)]
struct Socket {
    #[allow(dead_code)]
    fd: i32,
}

fn spaced() -> Encoder {
    Encoder::new(EncodeConfig::default())
}

fn compact() -> Encoder {
    Encoder::new(EncodeConfig {
        style: OutputStyle::Compact,
        ..EncodeConfig::default()
    })
}

fn nested_lists(levels: usize) -> (Value, serde_json::Value) {
    let mut value = Value::from(1);
    let mut json = json!(1);
    for _ in 0..levels {
        value = Value::List(vec![value]);
        json = serde_json::Value::Array(vec![json]);
    }

    (value, json)
}

// ---- scenarios ---------------------------------------------------------

#[test]
fn tx_op_serializes_through_its_conversion() {
    let text = spaced()
        .to_string(&Value::tx_op(PutFixture))
        .expect("tx op should encode");

    assert_eq!(text, r#"{"put": {"id": 1}}"#);
}

#[test]
fn compact_style_drops_separator_spaces() {
    let text = compact()
        .to_string(&Value::tx_op(PutFixture))
        .expect("tx op should encode");

    assert_eq!(text, r#"{"put":{"id":1}}"#);
}

#[test]
fn nested_query_tail_inside_query_conversion_is_resolved() {
    let text = spaced()
        .to_string(&Value::query(TailListQuery))
        .expect("query should encode");

    assert_eq!(text, r#"["limit:10"]"#);
}

#[test]
fn plain_mapping_is_unchanged() {
    let value = Value::map([("a", 1)]);
    let text = spaced().to_string(&value).expect("map should encode");

    assert_eq!(text, r#"{"a": 1}"#);
}

#[test]
fn domain_value_encodes_like_its_conversion() {
    let cases = [
        Value::tx_op(PutFixture),
        Value::query(TailListQuery),
        Value::query_tail(LimitFixture),
    ];

    for value in cases {
        let domain = value.as_domain().expect("case should be a domain value");
        let direct = compact().to_string(&value).expect("domain value should encode");
        let converted = compact()
            .to_string(&domain.to_json())
            .expect("conversion should encode");

        assert_eq!(direct, converted, "delegation mismatch for {domain:?}");
    }
}

#[test]
fn domain_values_nested_in_native_containers_are_resolved() {
    let value = Value::map([
        ("ops", Value::List(vec![Value::tx_op(PutFixture), Value::Null])),
        ("query", Value::query(TailListQuery)),
    ]);

    let resolved = compact().to_json_value(&value).expect("tree should encode");

    assert_eq!(
        resolved,
        json!({"ops": [{"put": {"id": 1}}, null], "query": ["limit:10"]})
    );
}

#[test]
fn map_key_order_is_preserved() {
    let value = Value::map([("z", 1), ("a", 2), ("m", 3)]);
    let text = compact().to_string(&value).expect("map should encode");

    assert_eq!(text, r#"{"z":1,"a":2,"m":3}"#);
}

#[test]
fn pretty_output_is_indented() {
    let encoder = Encoder::new(EncodeConfig {
        style: OutputStyle::Pretty,
        ..EncodeConfig::default()
    });
    let text = encoder
        .to_string(&Value::tx_op(PutFixture))
        .expect("tx op should encode");

    assert_eq!(text, "{\n  \"put\": {\n    \"id\": 1\n  }\n}");
}

#[test]
fn to_writer_matches_to_string() {
    let value = Value::query(TailListQuery);
    let mut out = Vec::new();
    compact()
        .to_writer(&mut out, &value)
        .expect("writer encode should succeed");

    let text = compact().to_string(&value).expect("string encode should succeed");
    assert_eq!(String::from_utf8(out).expect("output should be utf-8"), text);
}

// ---- failures ----------------------------------------------------------

#[test]
fn foreign_value_is_unsupported() {
    let err = compact()
        .to_string(&Value::foreign(&Socket { fd: 3 }))
        .expect_err("foreign value must fail");

    assert_eq!(err.class, ErrorClass::Unsupported);
    assert_eq!(err.origin, ErrorOrigin::Encode);
    let Some(EncodeError::Unsupported { type_name, path }) = err.encode_detail() else {
        panic!("expected unsupported detail, got {err:?}");
    };
    assert!(type_name.ends_with("Socket"), "unexpected type name: {type_name}");
    assert_eq!(path, "$");
}

#[test]
fn unsupported_error_reports_path_of_failing_node() {
    let value = Value::map([(
        "tx_ops",
        Value::List(vec![
            Value::tx_op(PutFixture),
            Value::map([("doc", Value::foreign(&Socket { fd: 4 }))]),
        ]),
    )]);

    let err = compact().to_string(&value).expect_err("foreign value must fail");
    let Some(EncodeError::Unsupported { path, .. }) = err.encode_detail() else {
        panic!("expected unsupported detail, got {err:?}");
    };

    assert_eq!(path, "$.tx_ops[1].doc");
}

#[test]
fn foreign_value_returned_by_conversion_is_unsupported() {
    #[derive(Debug)]
    struct LeakyOp;

    impl ToJson for LeakyOp {
        fn to_json(&self) -> Value {
            Value::map([("put", Value::foreign(&Socket { fd: 5 }))])
        }
    }

    impl TxOp for LeakyOp {}

    let err = compact()
        .to_string(&Value::tx_op(LeakyOp))
        .expect_err("foreign value inside conversion must fail");

    assert!(err.is_unsupported());
    assert!(err.message.contains("$.put"), "unexpected error: {err}");
}

#[test]
fn base_fallback_rejects_domain_values() {
    let encoder = Encoder::with_fallback(BaseFallback, EncodeConfig::default());
    let err = encoder
        .to_string(&Value::tx_op(PutFixture))
        .expect_err("base encoder must reject domain values");

    assert_eq!(
        err.encode_detail(),
        Some(&EncodeError::Unsupported {
            type_name: "tx_op".to_string(),
            path: "$".to_string(),
        })
    );
    assert_eq!(
        err.display_with_class(),
        "encode:unsupported: object of type tx_op is not JSON serializable (at $)"
    );
}

#[test]
fn base_and_domain_fallback_agree_on_native_values() {
    let value = Value::map([("a", Value::List(vec![1.into(), "x".into(), Value::Null]))]);
    let base = Encoder::with_fallback(BaseFallback, EncodeConfig::default());

    assert_eq!(
        base.to_string(&value).expect("base encoder should accept native values"),
        spaced().to_string(&value).expect("domain encoder should accept native values"),
    );
}

#[test]
fn non_finite_float_is_unsupported() {
    let err = compact()
        .to_string(&Value::List(vec![Value::Float(f64::NAN)]))
        .expect_err("NaN must fail");

    assert_eq!(err.class, ErrorClass::Unsupported);
    assert!(matches!(
        err.encode_detail(),
        Some(EncodeError::NonFiniteFloat { path, .. }) if path == "$[0]"
    ));
}

#[test]
fn self_referential_conversion_hits_depth_limit() {
    let encoder = Encoder::new(EncodeConfig {
        max_depth: 8,
        ..EncodeConfig::default()
    });
    let err = encoder
        .to_string(&Value::query(SelfReferentialQuery))
        .expect_err("cyclic conversion must fail");

    assert_eq!(err.class, ErrorClass::InvariantViolation);
    assert!(matches!(
        err.encode_detail(),
        Some(EncodeError::DepthLimitExceeded { limit: 8, .. })
    ));
}

#[test]
fn depth_limit_counts_fallback_conversions() {
    let encoder = Encoder::new(EncodeConfig {
        max_depth: 1,
        ..EncodeConfig::default()
    });

    encoder
        .to_string(&Value::query_tail(LimitFixture))
        .expect("one conversion should fit");
    let err = encoder
        .to_string(&Value::query(TailListQuery))
        .expect_err("two nested conversions should not fit");

    assert!(matches!(
        err.encode_detail(),
        Some(EncodeError::DepthLimitExceeded { limit: 1, path }) if path == "$[0]"
    ));
}

#[test]
fn deep_native_tree_is_not_depth_limited() {
    let (value, json) = nested_lists(DEFAULT_MAX_DEPTH + 72);

    let text = compact().to_string(&value).expect("native nesting should encode");

    assert_eq!(
        text,
        serde_json::to_string(&json).expect("serde_json should encode")
    );
}

#[test]
fn deep_native_tree_inside_conversion_is_not_depth_limited() {
    #[derive(Debug)]
    struct DeepOp;

    impl ToJson for DeepOp {
        fn to_json(&self) -> Value {
            nested_lists(DEFAULT_MAX_DEPTH * 2).0
        }
    }

    impl TxOp for DeepOp {}

    let encoder = Encoder::new(EncodeConfig {
        max_depth: 1,
        ..EncodeConfig::default()
    });

    let resolved = encoder
        .to_json_value(&Value::tx_op(DeepOp))
        .expect("one conversion of a deep native tree should encode");
    assert_eq!(resolved, nested_lists(DEFAULT_MAX_DEPTH * 2).1);
}

// ---- serde integration -------------------------------------------------

#[test]
fn value_serializes_inside_serde_structs() {
    #[derive(serde::Serialize)]
    struct Body {
        query: Value,
        tx_ops: Vec<Value>,
    }

    let body = Body {
        query: Value::query(TailListQuery),
        tx_ops: vec![Value::tx_op(PutFixture)],
    };

    let text = serde_json::to_string(&body).expect("body should serialize");
    assert_eq!(text, r#"{"query":["limit:10"],"tx_ops":[{"put":{"id":1}}]}"#);
}

#[test]
fn value_serialize_surfaces_unsupported_error() {
    let err = serde_json::to_string(&Value::foreign(&Socket { fd: 6 }))
        .expect_err("foreign value must fail through serde");

    assert!(
        err.to_string().contains("is not JSON serializable"),
        "unexpected error: {err}"
    );
}

#[test]
fn free_functions_use_domain_encoder() {
    let value = Value::map([("op", ValueMap::new().with("q", Value::query(TailListQuery)))]);

    assert_eq!(
        to_string(&value).expect("value should encode"),
        r#"{"op": {"q": ["limit:10"]}}"#
    );
    assert_eq!(
        to_json_value(&value).expect("value should resolve"),
        json!({"op": {"q": ["limit:10"]}})
    );
}

// ---- properties --------------------------------------------------------

fn arb_json() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        any::<u64>().prop_map(|n| json!(n)),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(|f| json!(f)),
        "[a-zA-Z0-9 _\"\\\\]{0,8}".prop_map(serde_json::Value::String),
    ];

    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            prop::collection::vec(("[a-z_$]{0,6}", inner), 0..4).prop_map(|entries| {
                serde_json::Value::Object(entries.into_iter().collect())
            }),
        ]
    })
}

proptest! {
    #[test]
    fn native_values_encode_like_serde_json(json in arb_json()) {
        let expected = serde_json::to_string(&json).expect("serde_json should encode");
        let encoded = compact()
            .to_string(&Value::from(json))
            .expect("native value should encode");

        prop_assert_eq!(encoded, expected);
    }

    #[test]
    fn spaced_output_parses_back_to_the_tree(json in arb_json()) {
        let encoded = spaced()
            .to_string(&Value::from(json.clone()))
            .expect("native value should encode");
        let compact_text = serde_json::to_string(&json).expect("serde_json should encode");
        let parsed: serde_json::Value =
            serde_json::from_str(&encoded).expect("spaced output should be valid JSON");
        let expected: serde_json::Value =
            serde_json::from_str(&compact_text).expect("compact output should be valid JSON");

        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn wrapped_native_tree_encodes_like_the_tree(json in arb_json()) {
        #[derive(Debug)]
        struct Wrapped(serde_json::Value);

        impl ToJson for Wrapped {
            fn to_json(&self) -> Value {
                Value::from(self.0.clone())
            }
        }

        impl TxOp for Wrapped {}

        let expected = serde_json::to_string(&json).expect("serde_json should encode");
        let encoded = compact()
            .to_string(&Value::tx_op(Wrapped(json)))
            .expect("wrapped value should encode");

        prop_assert_eq!(encoded, expected);
    }
}
