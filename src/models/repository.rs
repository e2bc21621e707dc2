//! Repository model matching the upstream API's repository payload.

use serde::Deserialize;

/// Repository identifier; the upstream API emits either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RepositoryId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryId::Number(n) => write!(f, "{}", n),
            RepositoryId::Text(s) => f.write_str(s),
        }
    }
}

/// Nullable string in the upstream encoding: `{ "String": "...", "Valid": true }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NullableString {
    #[serde(rename = "String", default)]
    pub string: String,
    #[serde(rename = "Valid", default)]
    pub valid: bool,
}

impl NullableString {
    /// The value, if the upstream marked it valid.
    pub fn into_option(self) -> Option<String> {
        self.valid.then_some(self.string)
    }
}

/// Repository as sent by `GET /repository/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryRecord {
    pub id: RepositoryId,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<NullableString>,
}

/// Envelope of `GET /repository/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryResponse {
    pub repository: RepositoryRecord,
}

/// Repository metadata used for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryMetadata {
    pub id: RepositoryId,
    pub full_name: String,
    pub description: Option<String>,
}

impl RepositoryMetadata {
    /// Description text, empty when the repository has none.
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

impl From<RepositoryRecord> for RepositoryMetadata {
    fn from(record: RepositoryRecord) -> Self {
        Self {
            id: record.id,
            full_name: record.full_name,
            description: record.description.and_then(NullableString::into_option),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata_from(value: serde_json::Value) -> RepositoryMetadata {
        let response: RepositoryResponse = serde_json::from_value(value).unwrap();
        response.repository.into()
    }

    #[test]
    fn test_valid_description_is_unwrapped() {
        let metadata = metadata_from(json!({
            "repository": {
                "id": 42,
                "full_name": "acme/widget",
                "description": { "String": "Widgets for everyone", "Valid": true }
            }
        }));

        assert_eq!(metadata.id, RepositoryId::Number(42));
        assert_eq!(metadata.full_name, "acme/widget");
        assert_eq!(metadata.description.as_deref(), Some("Widgets for everyone"));
    }

    #[test]
    fn test_invalid_description_is_none() {
        let metadata = metadata_from(json!({
            "repository": {
                "id": 42,
                "full_name": "acme/widget",
                "description": { "String": "stale", "Valid": false }
            }
        }));

        assert_eq!(metadata.description, None);
        assert_eq!(metadata.description_or_empty(), "");
    }

    #[test]
    fn test_missing_valid_marker_is_none() {
        let metadata = metadata_from(json!({
            "repository": {
                "id": "abc",
                "full_name": "acme/widget",
                "description": { "String": "no marker" }
            }
        }));

        assert_eq!(metadata.id.to_string(), "abc");
        assert_eq!(metadata.description, None);
    }

    #[test]
    fn test_null_or_absent_description() {
        let metadata = metadata_from(json!({
            "repository": { "id": 1, "full_name": "a/b", "description": null }
        }));
        assert_eq!(metadata.description, None);

        let metadata = metadata_from(json!({
            "repository": { "id": 1, "full_name": "a/b" }
        }));
        assert_eq!(metadata.description, None);
    }
}
