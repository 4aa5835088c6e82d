//! Comment, reply and like data structures.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

/// New comment on a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub book_id: i64,
    pub comment_content: String,
}

/// A comment written by the current user.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserComment {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub id: Option<i64>,
    pub comment_content: String,
    pub comment_book: Option<String>,
    pub comment_book_pic: Option<String>,
    pub comment_time: Option<String>,
}

/// New reply to a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentReplyRequest {
    pub comment_id: i64,
    pub reply_content: String,
}

/// A reply as listed under a comment.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentReply {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: i64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub comment_id: i64,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub user_photo: Option<String>,
    pub reply_content: String,
    pub create_time: Option<String>,
}

/// Like or unlike a comment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    pub comment_id: i64,
    pub liked: bool,
}
