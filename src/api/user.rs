//! Account, profile, comment, and reply endpoints.

use crate::api::USER_PREFIX;
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest, MultipartForm};
use crate::models::{
    CommentReply, CommentReplyRequest, CommentRequest, Feedback, LoginRequest, LoginResponse,
    Page, PageQuery, RegisterRequest, UserComment, UserInfo, UserInfoUpdate,
};

pub struct UserApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, form: &RegisterRequest) -> Result<()> {
        let request = ApiRequest::post(format!("{USER_PREFIX}/register")).json(form)?;
        self.client.call_unit(request).await
    }

    /// Log in. Storing the returned token is up to the caller.
    pub async fn login(&self, form: &LoginRequest) -> Result<LoginResponse> {
        let request = ApiRequest::post(format!("{USER_PREFIX}/login")).json(form)?;
        self.client.call(request).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.client
            .call_unit(ApiRequest::post(format!("{USER_PREFIX}/logout")))
            .await
    }

    pub async fn submit_feedback(&self, feedback: &Feedback) -> Result<()> {
        let request = ApiRequest::post(format!("{USER_PREFIX}/feedback")).json(feedback)?;
        self.client.call_unit(request).await
    }

    /// Profile of the logged-in user.
    pub async fn info(&self) -> Result<UserInfo> {
        self.client.call(ApiRequest::get(USER_PREFIX)).await
    }

    pub async fn update_info(&self, update: &UserInfoUpdate) -> Result<()> {
        let request = ApiRequest::put(USER_PREFIX).json(update)?;
        self.client.call_unit(request).await
    }

    pub async fn comment(&self, comment: &CommentRequest) -> Result<()> {
        let request = ApiRequest::post(format!("{USER_PREFIX}/comment")).json(comment)?;
        self.client.call_unit(request).await
    }

    /// Replace a comment's text. Sent as a form field, not JSON.
    pub async fn update_comment(&self, comment_id: i64, content: &str) -> Result<()> {
        let form = MultipartForm::new().text("content", content);
        let request = ApiRequest::put(format!("{USER_PREFIX}/comment/{comment_id}")).multipart(form);
        self.client.call_unit(request).await
    }

    pub async fn delete_comment(&self, comment_id: i64) -> Result<()> {
        let request = ApiRequest::delete(format!("{USER_PREFIX}/comment/{comment_id}"));
        self.client.call_unit(request).await
    }

    /// Comments written by the logged-in user.
    pub async fn list_comments(&self, page: &PageQuery) -> Result<Page<UserComment>> {
        let request = ApiRequest::get(format!("{USER_PREFIX}/comments")).query(page.pairs());
        self.client.call(request).await
    }

    pub async fn save_reply(&self, reply: &CommentReplyRequest) -> Result<()> {
        let request = ApiRequest::post(format!("{USER_PREFIX}/comment/reply")).json(reply)?;
        self.client.call_unit(request).await
    }

    pub async fn delete_reply(&self, reply_id: i64) -> Result<()> {
        let request = ApiRequest::delete(format!("{USER_PREFIX}/comment/reply/{reply_id}"));
        self.client.call_unit(request).await
    }

    pub async fn list_replies(&self, comment_id: i64) -> Result<Vec<CommentReply>> {
        let request = ApiRequest::get(format!("{USER_PREFIX}/comment/{comment_id}/replies"));
        self.client.call(request).await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use crate::auth::{CredentialField, CredentialStore};
    use crate::http::client::{AUTHORIZATION, CONTENT_TYPE};
    use crate::http::testing::harness;
    use crate::http::RequestBody;
    use crate::models::{CommentReplyRequest, LoginRequest};

    #[tokio::test]
    async fn login_returns_identity_without_sending_stale_token() {
        let h = harness();
        h.store.set(CredentialField::Token, "stale").await.unwrap();
        h.transport.reply_json(json!({
            "code": "00000",
            "data": {
                "uid": "3",
                "token": "t0k",
                "userName": "reader",
                "nickName": "R",
                "userType": 1,
                "expireTime": "1700000000000"
            }
        }));

        let form = LoginRequest {
            user_name: "reader".into(),
            password: "secret1".into(),
            ..LoginRequest::default()
        };
        let login = h.client.users().login(&form).await.unwrap();

        assert_eq!(login.token.as_deref(), Some("t0k"));
        assert_eq!(login.uid, Some(3));
        assert_eq!(login.expire_time, Some(1_700_000_000_000));
        assert!(h.notifier.errors().is_empty());
        let sent = h.transport.last();
        assert_eq!(sent.request.path, "/front/user/login");
        assert_eq!(sent.header(AUTHORIZATION), None);
    }

    #[tokio::test]
    async fn logout_carries_token() {
        let h = harness();
        h.store.set(CredentialField::Token, "t0k").await.unwrap();
        h.transport.reply_json(json!({"code": "00000"}));

        h.client.users().logout().await.unwrap();

        assert_eq!(h.transport.last().header(AUTHORIZATION), Some("Bearer t0k"));
    }

    #[tokio::test]
    async fn update_comment_is_multipart() {
        let h = harness();
        h.transport.reply_json(json!({"code": "00000"}));

        h.client.users().update_comment(11, "better").await.unwrap();

        let sent = h.transport.last();
        assert_eq!(sent.request.method, Method::PUT);
        assert_eq!(sent.request.path, "/front/user/comment/11");
        assert_eq!(sent.header(CONTENT_TYPE), None);
        let RequestBody::Multipart(form) = &sent.request.body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.text_value("content"), Some("better"));
    }

    #[tokio::test]
    async fn reply_endpoints_build_expected_requests() {
        let h = harness();
        h.transport.reply_json(json!({"code": "00000"}));
        h.transport.reply_json(json!({"code": "00000"}));
        h.transport.reply_json(json!({
            "code": "00000",
            "data": [{"id": "1", "commentId": "4", "userId": "3", "replyContent": "agreed"}]
        }));

        let reply = CommentReplyRequest {
            comment_id: 4,
            reply_content: "agreed".into(),
        };
        h.client.users().save_reply(&reply).await.unwrap();
        h.client.users().delete_reply(1).await.unwrap();
        let replies = h.client.users().list_replies(4).await.unwrap();

        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].reply_content, "agreed");
        assert_eq!((replies[0].id, replies[0].comment_id), (1, 4));
        assert_eq!(replies[0].user_id, Some(3));
        let sent = h.transport.sent();
        assert_eq!(
            sent[0].request.body,
            RequestBody::Json(json!({"commentId": 4, "replyContent": "agreed"}))
        );
        assert_eq!(sent[1].request.method, Method::DELETE);
        assert_eq!(sent[1].request.path, "/front/user/comment/reply/1");
        assert_eq!(sent[2].request.path, "/front/user/comment/4/replies");
    }

    #[tokio::test]
    async fn info_round_trips_profile() {
        let h = harness();
        h.transport.reply_json(json!({
            "code": "00000",
            "data": {"nickName": "R", "userPhoto": "/avatars/3.png", "gender": 1}
        }));

        let info = h.client.users().info().await.unwrap();

        assert_eq!(info.nick_name.as_deref(), Some("R"));
        assert_eq!(h.transport.last().request.path, "/front/user");
    }

    #[tokio::test]
    async fn wrapper_errors_pass_through() {
        let h = harness();
        h.transport
            .reply_json(json!({"code": "A0230", "message": "expired"}));

        let err = h.client.users().info().await.unwrap_err();

        assert_eq!(err.to_string(), "expired");
        assert_eq!(h.navigator.visits().len(), 1);
    }
}
