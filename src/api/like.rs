//! Comment like endpoints.

use std::collections::BTreeMap;

use crate::api::COMMENT_PREFIX;
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest};
use crate::models::LikeToggle;

pub struct LikeApi<'a> {
    client: &'a ApiClient,
}

impl<'a> LikeApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Like (`liked = true`) or unlike a comment.
    pub async fn toggle(&self, comment_id: i64, liked: bool) -> Result<()> {
        let request = ApiRequest::post(format!("{COMMENT_PREFIX}/like"))
            .json(&LikeToggle { comment_id, liked })?;
        self.client.call_unit(request).await
    }

    pub async fn count(&self, comment_id: i64) -> Result<i64> {
        let request = ApiRequest::get(format!("{COMMENT_PREFIX}/{comment_id}/like/count"));
        self.client.call(request).await
    }

    /// Whether the current user likes the comment.
    pub async fn status(&self, comment_id: i64) -> Result<bool> {
        let request = ApiRequest::get(format!("{COMMENT_PREFIX}/{comment_id}/like/status"));
        self.client.call(request).await
    }

    /// Like status for several comments at once, keyed by comment id.
    pub async fn batch_status(&self, comment_ids: &[i64]) -> Result<BTreeMap<i64, bool>> {
        let request =
            ApiRequest::post(format!("{COMMENT_PREFIX}/like/batch-status")).json(comment_ids)?;
        self.client.call(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::http::RequestBody;
    use crate::http::testing::harness;

    #[tokio::test]
    async fn toggle_posts_comment_and_state() {
        let h = harness();
        h.transport.reply_json(json!({"code": "00000"}));

        h.client.likes().toggle(5, false).await.unwrap();

        let sent = h.transport.last();
        assert_eq!(sent.request.path, "/front/comment/like");
        assert_eq!(
            sent.request.body,
            RequestBody::Json(json!({"commentId": 5, "liked": false}))
        );
    }

    #[tokio::test]
    async fn count_and_status_read_scalars() {
        let h = harness();
        h.transport.reply_json(json!({"code": "00000", "data": 12}));
        h.transport.reply_json(json!({"code": "00000", "data": false}));

        assert_eq!(h.client.likes().count(5).await.unwrap(), 12);
        assert!(!h.client.likes().status(5).await.unwrap());

        let sent = h.transport.sent();
        assert_eq!(sent[0].request.path, "/front/comment/5/like/count");
        assert_eq!(sent[1].request.path, "/front/comment/5/like/status");
    }

    #[tokio::test]
    async fn batch_status_sends_bare_id_list() {
        let h = harness();
        h.transport
            .reply_json(json!({"code": "00000", "data": {"1": true, "2": false}}));

        let status = h.client.likes().batch_status(&[1, 2]).await.unwrap();

        assert_eq!(status.get(&1), Some(&true));
        assert_eq!(status.get(&2), Some(&false));
        assert_eq!(h.transport.last().request.body, RequestBody::Json(json!([1, 2])));
    }
}
