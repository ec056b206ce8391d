use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Keys that look like generated document ids sort after regular keys.
fn is_id_like(key: &str) -> bool {
    key.len() >= 20 && key.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| (is_id_like(a), a).cmp(&(is_id_like(b), b)));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Pretty JSON with recursively sorted keys, 4-space indent and a trailing
/// newline, so extracted files diff cleanly.
pub fn to_sorted_pretty_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let sorted = sort_keys(serde_json::to_value(value)?);
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    sorted.serialize(&mut ser)?;
    let mut text = String::from_utf8(buf)?;
    text.push('\n');
    Ok(text)
}
