//! Login and logout

use serde::Deserialize;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::{HubClient, handle_response};
use tekhub_core::dto::auth::LoginResponse;

/// Older Hub deployments return the token bare, newer ones wrap it
#[derive(Deserialize)]
#[serde(untagged)]
enum LoginBody {
    Wrapped { data: LoginResponse },
    Bare(LoginResponse),
}

impl HubClient {
    /// Exchange a GitHub OAuth code for a Hub token and store it with the
    /// user id
    pub async fn login(&self, code: &str) -> Result<LoginResponse> {
        let url = format!("{}/auth/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("code", code)])
            .send()
            .await?;

        let login = match handle_response::<LoginBody>(response).await? {
            LoginBody::Wrapped { data } => data,
            LoginBody::Bare(login) => login,
        };

        self.credentials
            .save(&Credentials::new(login.token.clone(), login.id))?;
        tracing::info!("Logged in to {}", self.base_url);
        Ok(login)
    }

    /// Forget the stored token and user id
    pub fn logout(&self) -> Result<()> {
        self.credentials.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.credentials.load()?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockito::Matcher;

    use crate::{
        ClientError, CredentialStore, FileCredentialStore, HubClient, MemoryCredentialStore,
    };

    #[tokio::test]
    async fn test_login_stores_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/login")
            .match_query(Matcher::UrlEncoded("code".into(), "gh-code".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"token":"hub-token"}}"#)
            .create_async()
            .await;

        let store = Arc::new(MemoryCredentialStore::new());
        let client = HubClient::new(server.url(), store.clone());
        assert!(!client.is_authenticated().unwrap());

        let login = client.login("gh-code").await.unwrap();
        mock.assert_async().await;
        assert_eq!(login.token, "hub-token");
        assert_eq!(store.load().unwrap().unwrap().token, "hub-token");
        assert!(client.is_authenticated().unwrap());

        client.logout().unwrap();
        assert!(!client.is_authenticated().unwrap());
    }

    #[tokio::test]
    async fn test_login_persists_user_id() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/login")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"token":"tok","id":42}}"#)
            .create_async()
            .await;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        let client = HubClient::new(server.url(), Arc::new(FileCredentialStore::new(&path)));
        assert_eq!(client.login("x").await.unwrap().id, Some(42));

        let reloaded = HubClient::new(server.url(), Arc::new(FileCredentialStore::new(&path)));
        assert_eq!(reloaded.user_id().unwrap(), Some(42));

        reloaded.logout().unwrap();
        assert_eq!(client.user_id().unwrap(), None);
        assert!(FileCredentialStore::new(&path).load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_accepts_bare_token() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/login")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token":"bare"}"#)
            .create_async()
            .await;

        let client = HubClient::new(server.url(), Arc::new(MemoryCredentialStore::new()));
        assert_eq!(client.login("x").await.unwrap().token, "bare");
    }

    #[tokio::test]
    async fn test_failed_login_keeps_store_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/login")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"errors":[{"code":"invalid-code","detail":"bad verification code"}]}"#)
            .create_async()
            .await;

        let client = HubClient::new(server.url(), Arc::new(MemoryCredentialStore::new()));
        let err = client.login("x").await.unwrap_err();
        assert!(matches!(err, ClientError::ApiError { status: 401, .. }));
        assert_eq!(err.server_text(), "bad verification code");
        assert!(!client.is_authenticated().unwrap());
    }
}
