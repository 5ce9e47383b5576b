//! Resource upload (authenticated)

use crate::error::{ClientError, Result};
use crate::{HubClient, handle_response};
use tekhub_core::dto::upload::{UploadRequest, UploadResponse};

impl HubClient {
    /// Submit a resource definition to the catalog
    ///
    /// The upload is attributed to the logged-in user unless the request
    /// names one. A 2xx reply with `status: false` is reported as an API
    /// error carrying the server's message.
    pub async fn upload(&self, mut req: UploadRequest) -> Result<UploadResponse> {
        req.validate()?;
        if req.user_id.is_none() {
            req.user_id = self.user_id()?;
        }

        let url = format!("{}/upload", self.base_url);
        let response = self
            .authorized(self.client.post(&url))?
            .json(&req)
            .send()
            .await?;

        let status = response.status().as_u16();
        let reply: UploadResponse = handle_response(response).await?;
        if !reply.status {
            return Err(ClientError::api_error(status, reply.message));
        }

        tracing::info!("Uploaded {} {}", req.kind, req.name);
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockito::Matcher;

    use crate::{ClientError, Credentials, HubClient, MemoryCredentialStore};
    use tekhub_core::domain::resource::ResourceKind;
    use tekhub_core::dto::upload::UploadRequest;

    fn request() -> UploadRequest {
        UploadRequest {
            name: "buildah".to_string(),
            description: "Build images".to_string(),
            kind: ResourceKind::Task,
            tags: vec!["image-build".to_string()],
            github: "https://github.com/org/catalog/buildah.yaml".to_string(),
            user_id: Some(9),
        }
    }

    #[tokio::test]
    async fn test_upload_sends_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload")
            .match_header("authorization", "Bearer tok")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "name": "buildah",
                "type": "task",
                "github": "https://github.com/org/catalog/buildah.yaml"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":true,"message":"Uploaded"}"#)
            .create_async()
            .await;

        let store = Arc::new(MemoryCredentialStore::with_token("tok"));
        let client = HubClient::new(server.url(), store);
        let reply = client.upload(request()).await.unwrap();
        assert_eq!(reply.message, "Uploaded");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_attributed_to_stored_user() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload")
            .match_body(Matcher::PartialJson(serde_json::json!({ "user_id": 42 })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":true,"message":"Uploaded"}"#)
            .create_async()
            .await;

        let store = MemoryCredentialStore::with_credentials(Credentials::new("tok", Some(42)));
        let client = HubClient::new(server.url(), Arc::new(store));
        let mut req = request();
        req.user_id = None;

        client.upload(req).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_rejected_by_server() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/upload")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":false,"message":"Resource already exists"}"#)
            .create_async()
            .await;

        let store = Arc::new(MemoryCredentialStore::with_token("tok"));
        let client = HubClient::new(server.url(), store);
        let err = client.upload(request()).await.unwrap_err();
        assert_eq!(err.server_text(), "Resource already exists");
    }

    #[tokio::test]
    async fn test_upload_validates_before_sending() {
        let store = Arc::new(MemoryCredentialStore::with_token("tok"));
        let client = HubClient::new("http://127.0.0.1:9", store);
        let mut req = request();
        req.github.clear();

        let err = client.upload(req).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }
}
