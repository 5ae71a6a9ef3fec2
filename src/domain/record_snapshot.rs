use serde_json::{Map, Value};

/// The field mapping of a newly created document, as delivered by the trigger.
///
/// Values may be plain JSON or wrapped in the datastore's typed-value
/// envelope (`{"stringValue": "..."}`); [`RecordSnapshot::field`] hides the
/// difference.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct RecordSnapshot(Map<String, Value>);

impl RecordSnapshot {
    /// Look up a field, unwrapping typed values. `null` reads as absent.
    pub fn field(&self, name: &str) -> Option<Value> {
        match self.0.get(name).map(unwrap_typed_value) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }
}

impl TryFrom<Value> for RecordSnapshot {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(format!("{} is not a document snapshot.", other)),
        }
    }
}

fn unwrap_typed_value(value: &Value) -> Value {
    let envelope = match value.as_object() {
        Some(envelope) if envelope.len() == 1 => envelope,
        _ => return value.clone(),
    };
    let (kind, inner) = match envelope.iter().next() {
        Some(entry) => entry,
        None => return value.clone(),
    };
    match kind.as_str() {
        "stringValue" | "timestampValue" | "booleanValue" | "doubleValue" => inner.clone(),
        "nullValue" => Value::Null,
        // 64-bit integers travel as strings so they survive JSON number precision.
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| inner.clone()),
            _ => inner.clone(),
        },
        _ => value.clone(),
    }
}
