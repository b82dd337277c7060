use serde::{Deserialize, Serialize};

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /signup`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Token issued by `/login` and `/signup`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Author reference embedded in profiles, posts and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub username: String,
}

/// Response of `GET /profile`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(default)]
    pub additional_email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    pub user: UserRef,
}

/// Body of `POST /profile`. Unset fields are omitted, so the default value
/// serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

/// An entry of `GET /post/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRecord {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub user: UserRef,
}

/// An entry of `GET /post/:id/comment`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRecord {
    pub id: i64,
    #[serde(default)]
    pub text: Option<String>,
    pub user: UserRef,
}

/// Body of `POST /post`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub title: String,
    pub description: String,
}

/// Body of `POST /comment/:postId`.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_fields_serialize_to_empty_object() {
        let json = serde_json::to_string(&ProfileFields::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_profile_fields_use_camel_case() {
        let fields = ProfileFields {
            additional_email: Some("a@b.c".to_string()),
            address: Some("1 Main St".to_string()),
            mobile: Some("555".to_string()),
        };
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["additionalEmail"], "a@b.c");
        assert_eq!(value["address"], "1 Main St");
        assert_eq!(value["mobile"], "555");
    }

    #[test]
    fn test_profile_response_tolerates_null_fields() {
        let json = r#"{"additionalEmail":null,"address":"here","user":{"username":"alice"}}"#;
        let profile: ProfileResponse = serde_json::from_str(json).unwrap();
        assert_eq!(profile.user.username, "alice");
        assert_eq!(profile.additional_email, None);
        assert_eq!(profile.address.as_deref(), Some("here"));
        assert_eq!(profile.mobile, None);
    }

    #[test]
    fn test_post_record_ignores_extra_fields() {
        let json = r#"{"id":7,"title":"t","description":"d",
            "user":{"username":"bob","id":3},"createdAt":"x"}"#;
        let post: PostRecord = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.user.username, "bob");
    }
}
