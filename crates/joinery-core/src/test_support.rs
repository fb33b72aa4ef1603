use crate::value::{Sequence, Tuple, Value};

/// Decode a JSON fixture into a runtime value.
pub(crate) fn value(json: serde_json::Value) -> Value {
    serde_json::from_value(json).expect("fixture should decode as a value")
}

pub(crate) fn tuple(json: serde_json::Value) -> Tuple {
    value(json)
        .into_tuple()
        .expect("fixture should decode as a tuple")
}

pub(crate) fn seq(json: serde_json::Value) -> Sequence {
    value(json)
        .into_sequence()
        .expect("fixture should decode as a sequence")
}

pub(crate) fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}
