//! Resource endpoints.

use crate::api::RESOURCE_PREFIX;
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest, MultipartForm};
use crate::models::ImgVerifyCode;

pub struct ResourceApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ResourceApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetch a new image verification challenge.
    pub async fn img_verify_code(&self) -> Result<ImgVerifyCode> {
        let request = ApiRequest::get(format!("{RESOURCE_PREFIX}/img_verify_code"));
        self.client.call(request).await
    }

    /// Upload an image and return its URL (possibly relative).
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let form = MultipartForm::new().file("file", file_name, bytes);
        let request = ApiRequest::post(format!("{RESOURCE_PREFIX}/image")).multipart(form);
        self.client.call(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::http::client::CONTENT_TYPE;
    use crate::http::testing::harness;
    use crate::http::{PartValue, RequestBody};

    #[tokio::test]
    async fn upload_sends_file_part() {
        let h = harness();
        h.transport
            .reply_json(json!({"code": "00000", "data": "/images/2024/a.png"}));

        let url = h
            .client
            .resources()
            .upload_image("a.png", vec![0x89, 0x50])
            .await
            .unwrap();

        assert_eq!(url, "/images/2024/a.png");
        let sent = h.transport.last();
        assert_eq!(sent.header(CONTENT_TYPE), None);
        let RequestBody::Multipart(form) = &sent.request.body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.parts[0].name, "file");
        assert_eq!(
            form.parts[0].value,
            PartValue::File {
                file_name: "a.png".into(),
                bytes: vec![0x89, 0x50]
            }
        );
    }

    #[tokio::test]
    async fn verify_code_is_public_get() {
        let h = harness();
        h.transport.reply_json(json!({
            "code": "00000",
            "data": {"sessionId": "s1", "img": "iVBOR"}
        }));

        let code = h.client.resources().img_verify_code().await.unwrap();

        assert_eq!(code.session_id, "s1");
        assert_eq!(h.transport.last().request.path, "/front/resource/img_verify_code");
    }
}
