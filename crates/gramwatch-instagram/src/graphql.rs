//! GraphQL follow-edge pagination: request building and response parsing.
//!
//! Parsing is separated from transport so it is testable without a network.
//! Instagram serves both relation edges through the same paginated shape;
//! only the query hash and the edge field name differ per relation kind.

use gramwatch_core::{MonError, MonErrorKind, Result};
use gramwatch_core_types::{Identity, RelationKind};
use serde::Deserialize;

/// Stable web query hash for the followers edge (`edge_followed_by`).
const FOLLOWERS_QUERY_HASH: &str = "c76146de99bb02f6415203be841dd25a";
/// Stable web query hash for the followees edge (`edge_follow`).
const FOLLOWEES_QUERY_HASH: &str = "d04b0a864b4b54837c0d870b0e77e076";

/// Page size requested per GraphQL call.
const PAGE_SIZE: u32 = 50;

/// Query hash for one relation kind.
pub fn query_hash(kind: RelationKind) -> &'static str {
    match kind {
        RelationKind::Followers => FOLLOWERS_QUERY_HASH,
        RelationKind::Followees => FOLLOWEES_QUERY_HASH,
    }
}

/// Serialize the GraphQL `variables` parameter for one page request.
pub fn build_variables(user_id: &str, after: Option<&str>) -> String {
    let variables = match after {
        Some(cursor) => serde_json::json!({
            "id": user_id,
            "first": PAGE_SIZE,
            "after": cursor,
        }),
        None => serde_json::json!({
            "id": user_id,
            "first": PAGE_SIZE,
        }),
    };
    variables.to_string()
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: GraphqlData,
}

#[derive(Debug, Deserialize)]
struct GraphqlData {
    user: Option<GraphqlUser>,
}

#[derive(Debug, Deserialize)]
struct GraphqlUser {
    edge_followed_by: Option<EdgeList>,
    edge_follow: Option<EdgeList>,
}

#[derive(Debug, Deserialize)]
struct EdgeList {
    page_info: PageInfo,
    edges: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Edge {
    node: EdgeNode,
}

#[derive(Debug, Deserialize)]
struct EdgeNode {
    username: String,
}

/// One parsed page of a follow edge.
#[derive(Debug)]
pub struct FollowPage {
    pub usernames: Vec<Identity>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

/// Parse one GraphQL response body into a page of the requested edge.
///
/// # Errors
///
/// - `Serialization` — body is not the expected JSON shape
/// - `Fetch` — the response is valid JSON but carries no user or no edge
///   for `kind` (the platform refused or truncated the query)
pub fn parse_follow_page(body: &str, kind: RelationKind) -> Result<FollowPage> {
    let response: GraphqlResponse = serde_json::from_str(body).map_err(|e| {
        MonError::new(MonErrorKind::Serialization)
            .with_op("parse_follow_page")
            .with_message(format!("unexpected GraphQL response shape: {}", e))
    })?;

    let user = response.data.user.ok_or_else(|| {
        MonError::new(MonErrorKind::Fetch)
            .with_op("parse_follow_page")
            .with_message("GraphQL response carries no user object")
    })?;

    let edge_list = match kind {
        RelationKind::Followers => user.edge_followed_by,
        RelationKind::Followees => user.edge_follow,
    }
    .ok_or_else(|| {
        MonError::new(MonErrorKind::Fetch)
            .with_op("parse_follow_page")
            .with_message(format!("GraphQL response carries no {} edge", kind))
    })?;

    Ok(FollowPage {
        usernames: edge_list
            .edges
            .into_iter()
            .map(|edge| Identity::from(edge.node.username))
            .collect(),
        end_cursor: edge_list.page_info.end_cursor,
        has_next_page: edge_list.page_info.has_next_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_body(edge_field: &str, usernames: &[&str], has_next: bool) -> String {
        let edges: Vec<serde_json::Value> = usernames
            .iter()
            .map(|u| serde_json::json!({"node": {"username": u}}))
            .collect();
        let end_cursor = has_next.then_some("CURSOR");
        serde_json::json!({
            "data": {
                "user": {
                    (edge_field): {
                        "count": usernames.len(),
                        "page_info": {
                            "has_next_page": has_next,
                            "end_cursor": end_cursor,
                        },
                        "edges": edges,
                    }
                }
            }
        })
        .to_string()
    }

    #[test]
    fn test_query_hashes_differ_per_kind() {
        assert_ne!(
            query_hash(RelationKind::Followers),
            query_hash(RelationKind::Followees)
        );
    }

    #[test]
    fn test_build_variables_first_page_has_no_cursor() {
        let variables = build_variables("12345", None);
        let parsed: serde_json::Value = serde_json::from_str(&variables).unwrap();
        assert_eq!(parsed["id"], "12345");
        assert_eq!(parsed["first"], 50);
        assert!(parsed.get("after").is_none());
    }

    #[test]
    fn test_build_variables_with_cursor() {
        let variables = build_variables("12345", Some("abc=="));
        let parsed: serde_json::Value = serde_json::from_str(&variables).unwrap();
        assert_eq!(parsed["after"], "abc==");
    }

    #[test]
    fn test_parse_followers_page() {
        let body = page_body("edge_followed_by", &["alice", "bob"], true);
        let page = parse_follow_page(&body, RelationKind::Followers).unwrap();
        assert_eq!(page.usernames.len(), 2);
        assert!(page.has_next_page);
        assert_eq!(page.end_cursor.as_deref(), Some("CURSOR"));
    }

    #[test]
    fn test_parse_followees_page_last() {
        let body = page_body("edge_follow", &["carol"], false);
        let page = parse_follow_page(&body, RelationKind::Followees).unwrap();
        assert_eq!(page.usernames, vec![Identity::from("carol")]);
        assert!(!page.has_next_page);
        assert!(page.end_cursor.is_none());
    }

    #[test]
    fn test_wrong_edge_for_kind_is_fetch_error() {
        let body = page_body("edge_follow", &["x"], false);
        let err = parse_follow_page(&body, RelationKind::Followers).unwrap_err();
        assert_eq!(err.kind(), MonErrorKind::Fetch);
    }

    #[test]
    fn test_garbage_body_is_serialization_error() {
        let err = parse_follow_page("<html>rate limited</html>", RelationKind::Followers)
            .unwrap_err();
        assert_eq!(err.kind(), MonErrorKind::Serialization);
    }

    #[test]
    fn test_missing_user_is_fetch_error() {
        let body = r#"{"data":{"user":null}}"#;
        let err = parse_follow_page(body, RelationKind::Followers).unwrap_err();
        assert_eq!(err.kind(), MonErrorKind::Fetch);
    }
}
