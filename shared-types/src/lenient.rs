use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// `deserialize_with` target for response fields the server may send with an
/// unexpected type. A value that does not fit `T` becomes `None` instead of
/// failing the whole body.
pub(crate) fn or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}
