//! The persisted hot-set size.

use hotset_core::traits::IKeyValueStore;
use hotset_observability::tracing_setup::events;

/// Read the hot-set size stored under `key`.
///
/// Anything other than a positive integer, including a failed read, falls
/// back to `default`. An absent value is not logged.
pub async fn read_top_n<S: IKeyValueStore>(store: &S, key: &str, default: usize) -> usize {
    let fallback = default.to_string();
    match store.get(key).await {
        Ok(None) => default,
        Ok(Some(value)) => match parse_top_n(&value) {
            Some(n) => n,
            None => {
                events::setting_fallback(key, &format!("not a positive integer: {value}"), &fallback);
                default
            }
        },
        Err(e) => {
            events::setting_fallback(key, &e.to_string(), &fallback);
            default
        }
    }
}

/// Accepts JSON integers and integer strings. Zero and negatives are rejected.
fn parse_top_n(value: &serde_json::Value) -> Option<usize> {
    let n = match value {
        serde_json::Value::Number(n) => n.as_u64()?,
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    if n == 0 {
        return None;
    }
    usize::try_from(n).ok()
}
