//! DTOs for link management endpoints.

use crate::domain::entities::Link;
use crate::utils::code_generator::MAX_CODE_LENGTH;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use std::sync::LazyLock;
use validator::Validate;

/// Letters and digits only. Empty is allowed and means "generate one".
static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]*$").unwrap());

const MAX_CODE_CHARS: u64 = MAX_CODE_LENGTH as u64;

/// Request to create a link.
///
/// `originalUrl` is optional at the JSON level so that a missing field is
/// reported as a 400 by the registry rather than as a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    pub original_url: Option<String>,

    /// Optional caller-chosen code.
    #[validate(length(max = MAX_CODE_CHARS))]
    #[validate(regex(path = *CODE_REGEX))]
    pub code: Option<String>,
}

/// Wire representation of a link.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    #[serde_as(as = "DisplayFromStr")]
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked_at: Option<DateTime<Utc>>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            code: link.code,
            original_url: link.original_url,
            clicks: link.clicks,
            created_at: link.created_at,
            last_clicked_at: link.last_clicked_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_response_wire_shape() {
        let created_at = "2025-01-02T03:04:05Z".parse::<DateTime<Utc>>().unwrap();
        let link = Link::new(
            42,
            "abc123".to_string(),
            "https://example.com".to_string(),
            0,
            created_at,
            None,
        );

        let value = serde_json::to_value(LinkResponse::from(link)).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "42",
                "code": "abc123",
                "originalUrl": "https://example.com",
                "clicks": 0,
                "createdAt": "2025-01-02T03:04:05Z",
                "lastClickedAt": null
            })
        );
    }

    #[test]
    fn test_create_request_camel_case() {
        let req: CreateLinkRequest =
            serde_json::from_value(json!({ "originalUrl": "https://a.com", "code": "promo" }))
                .unwrap();

        assert_eq!(req.original_url.as_deref(), Some("https://a.com"));
        assert_eq!(req.code.as_deref(), Some("promo"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_missing_fields_deserialize() {
        let req: CreateLinkRequest = serde_json::from_value(json!({})).unwrap();

        assert!(req.original_url.is_none());
        assert!(req.code.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_bad_code() {
        let req = CreateLinkRequest {
            original_url: Some("https://a.com".to_string()),
            code: Some("no-dashes".to_string()),
        };
        assert!(req.validate().is_err());

        let req = CreateLinkRequest {
            original_url: Some("https://a.com".to_string()),
            code: Some("a".repeat(MAX_CODE_LENGTH + 1)),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_accepts_code_at_length_limit() {
        let req = CreateLinkRequest {
            original_url: Some("https://a.com".to_string()),
            code: Some("a".repeat(MAX_CODE_LENGTH)),
        };

        assert!(req.validate().is_ok());
    }
}
