//! External service integrations

pub mod github;
pub mod jira;
pub mod llm;

use std::ops::Deref;

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

/// An upstream item decoded into `T` alongside the JSON it was decoded
/// from, so the cached record keeps the full payload.
#[derive(Debug, Clone)]
pub struct Captured<T> {
    pub item: T,
    pub raw: Value,
}

impl<T> Deref for Captured<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

impl<'de, T> Deserialize<'de> for Captured<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let item = T::deserialize(&raw).map_err(D::Error::custom)?;
        Ok(Self { item, raw })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn keeps_fields_the_type_ignores() {
        let captured: Captured<Named> =
            serde_json::from_value(json!({"name": "acme", "stars": 4})).unwrap();
        assert_eq!(captured.name, "acme");
        assert_eq!(captured.raw["stars"], 4);
    }

    #[test]
    fn rejects_items_missing_required_fields() {
        let result = serde_json::from_value::<Captured<Named>>(json!({"stars": 4}));
        assert!(result.is_err());
    }
}
