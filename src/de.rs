use serde::de::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept any JSON value as a flag, by its truthiness. `false`, `null`, `0`,
/// `""`, `"0"`, `[]` and `{}` are false; everything else is true.
pub fn truthy<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    Value::deserialize(deserializer).map(|v| match v {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map_or(true, |x| x != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(xs) => !xs.is_empty(),
        Value::Object(m) => !m.is_empty(),
    })
}

#[test]
fn test_truthy() {
    #[derive(Debug, PartialEq, Eq, serde::Deserialize)]
    struct T {
        #[serde(deserialize_with = "truthy")]
        val: bool,
    }

    for raw in ["true", "1", "-2.5", r#""yes""#, r#""false""#, "[0]", r#"{"a": 1}"#] {
        let json = format!(r#"{{"val": {}}}"#, raw);
        assert_eq!(
            serde_json::from_str::<T>(&json).unwrap(),
            T { val: true },
            "{}",
            raw
        );
    }

    for raw in ["false", "null", "0", "0.0", r#""""#, r#""0""#, "[]", "{}"] {
        let json = format!(r#"{{"val": {}}}"#, raw);
        assert_eq!(
            serde_json::from_str::<T>(&json).unwrap(),
            T { val: false },
            "{}",
            raw
        );
    }
}

/// Keep a value only if it's a string, discarding anything else.
pub fn only_string<'a, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'a>,
{
    Value::deserialize(deserializer).map(|v| match v {
        Value::String(s) => Some(s),
        _ => None,
    })
}

#[test]
fn test_only_string() {
    #[derive(Debug, PartialEq, Eq, serde::Deserialize)]
    struct T {
        #[serde(deserialize_with = "only_string")]
        val: Option<String>,
    }

    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": "invalid_auth"}"#).unwrap(),
        T {
            val: Some("invalid_auth".into())
        },
    );

    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": 42}"#).unwrap(),
        T { val: None }
    );
    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": null}"#).unwrap(),
        T { val: None }
    );
}
