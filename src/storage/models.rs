use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comb and whatever honey was loaded with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comb {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,

    /// Always serialized as an array; empty when no children were loaded.
    #[serde(default)]
    pub honey: Vec<Honey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Honey {
    pub comb_id: i32,
    #[serde(rename = "type")]
    pub honey_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visits: i32,
}

/// Honey-shaped request body for creating a record
///
/// `combId` and the timestamps may be present but are never trusted:
/// the comb id comes from the path and timestamps from the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHoney {
    #[serde(rename = "type")]
    pub honey_type: String,
    #[serde(default)]
    pub visits: Option<i32>,
    #[serde(default)]
    pub comb_id: Option<i64>,
}

/// 存储后端信息
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comb_serializes_empty_honey_as_array() {
        let now = Utc::now();
        let comb = Comb {
            id: 1,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            honey: Vec::new(),
        };

        let value = serde_json::to_value(&comb).unwrap();
        assert_eq!(value["honey"], json!([]));
        assert_eq!(value["deletedAt"], json!(null));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
    }

    #[test]
    fn test_honey_uses_type_key() {
        let now = Utc::now();
        let honey = Honey {
            comb_id: 3,
            honey_type: "clover".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            visits: 2,
        };

        let value = serde_json::to_value(&honey).unwrap();
        assert_eq!(value["combId"], json!(3));
        assert_eq!(value["type"], json!("clover"));
        assert_eq!(value["visits"], json!(2));
    }

    #[test]
    fn test_new_honey_accepts_full_honey_shape() {
        let body = json!({
            "combId": 99,
            "type": "acacia",
            "visits": 4,
            "createdAt": "2024-01-01T00:00:00Z",
            "deletedAt": null
        });

        let new_honey: NewHoney = serde_json::from_value(body).unwrap();
        assert_eq!(new_honey.honey_type, "acacia");
        assert_eq!(new_honey.visits, Some(4));
        assert_eq!(new_honey.comb_id, Some(99));
    }

    #[test]
    fn test_new_honey_requires_type() {
        let result: Result<NewHoney, _> = serde_json::from_value(json!({ "visits": 1 }));
        assert!(result.is_err());
    }
}
