//! Wire types for the posts collection
//!
//! Field names on the wire are camelCase (`userId`).

use serde::{Deserialize, Serialize};

/// Keys every post object carries
pub const POST_KEYS: [&str; 4] = ["userId", "id", "title", "body"];

/// A post as held by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

/// Payload for creating a post; the server assigns the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

/// Partial update; absent fields are left out of the request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl PostPatch {
    /// Patch that only replaces the body
    pub fn body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_uses_camel_case_user_id() {
        let post = Post {
            id: 2,
            user_id: 1,
            title: "t".into(),
            body: "b".into(),
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["userId"], 1);
        assert!(value.get("user_id").is_none());
        for key in POST_KEYS {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_body_patch_sends_only_body() {
        let value = serde_json::to_value(PostPatch::body("bla bla bla!")).unwrap();
        assert_eq!(value, json!({ "body": "bla bla bla!" }));
    }

    #[test]
    fn test_new_post_has_no_id() {
        let new_post = NewPost {
            title: "my new test post".into(),
            body: "this is the content of my new test post.".into(),
            user_id: 101,
        };
        let value = serde_json::to_value(&new_post).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["userId"], 101);
    }
}
