//! Resource types returned by the wrapped endpoints.

use serde::{Deserialize, Serialize};

/// A user account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub profile_picture: String,
}

/// A tag and the number of media carrying it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub media_count: u64,
    pub name: String,
}

/// Like/comment counter attached to a media object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Count {
    pub count: u64,
}

/// A photo or video post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    pub id: String,
    /// `image` or `video`.
    #[serde(rename = "type")]
    pub kind: String,
    pub link: String,
    pub filter: String,
    pub tags: Vec<String>,
    /// Unix timestamp, sent as a string.
    pub created_time: String,
    pub user: Option<User>,
    pub likes: Count,
    pub comments: Count,
    pub user_has_liked: bool,
}

/// The authenticated user's relationship with another user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relationship {
    /// `follows`, `requested` or `none`.
    pub outgoing_status: String,
    /// `followed_by`, `requested_by`, `blocked_by_you` or `none`.
    pub incoming_status: String,
    /// Undocumented upstream but long stable.
    pub target_user_is_private: bool,
}
