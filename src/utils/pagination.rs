use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(10),
            offset: Some(0),
        }
    }
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).max(1).min(100)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params_default() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_pagination_params_custom_values() {
        let params = PaginationParams {
            limit: Some(20),
            offset: Some(40),
        };
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn test_pagination_params_limit_boundary_cases() {
        let test_cases = vec![
            (Some(1), 1),
            (Some(50), 50),
            (Some(100), 100),
            (Some(101), 100),
            (Some(0), 1),
            (Some(-1), 1),
            (None, 10),
        ];

        for (input, expected) in test_cases {
            let params = PaginationParams {
                limit: input,
                offset: Some(0),
            };
            assert_eq!(params.limit(), expected);
        }
    }

    #[test]
    fn test_pagination_params_offset_boundary_cases() {
        let test_cases = vec![
            (Some(0), 0),
            (Some(10), 10),
            (Some(1000), 1000),
            (Some(-1), 0),
            (None, 0),
        ];

        for (input, expected) in test_cases {
            let params = PaginationParams {
                limit: Some(10),
                offset: input,
            };
            assert_eq!(params.offset(), expected);
        }
    }

    #[test]
    fn test_pagination_params_deserialize_with_values() {
        let json = r#"{"limit":"25","offset":"50"}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_pagination_params_deserialize_empty_strings() {
        let json = r#"{"limit":"","offset":""}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_pagination_params_deserialize_missing_fields() {
        let json = r#"{}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_pagination_meta_serialize() {
        let meta = PaginationMeta {
            total: 100,
            limit: 20,
            offset: 40,
            has_more: true,
        };
        let serialized = serde_json::to_string(&meta).unwrap();
        assert!(serialized.contains(r#""total":100"#));
        assert!(serialized.contains(r#""limit":20"#));
        assert!(serialized.contains(r#""offset":40"#));
        assert!(serialized.contains(r#""has_more":true"#));
    }
}
