use serde::{Deserialize, Deserializer};

/// Identifiers arrive as strings from most routes and as integers from
/// some aggregate queries; both are kept as text.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
    }

    #[test]
    fn test_accepts_text_and_integers() {
        let a: Row = serde_json::from_value(json!({ "id": "abc" })).unwrap();
        let b: Row = serde_json::from_value(json!({ "id": 42 })).unwrap();
        let c: Row = serde_json::from_value(json!({ "id": null })).unwrap();
        assert_eq!(a.id, "abc");
        assert_eq!(b.id, "42");
        assert_eq!(c.id, "");
    }
}
