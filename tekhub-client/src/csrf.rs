//! CSRF token handshake for mutating dashboard calls

use reqwest::RequestBuilder;

use crate::error::{ClientError, Result};
use crate::{DashboardClient, check_status};

pub(crate) const CSRF_HEADER: &str = "X-CSRF-Token";

impl DashboardClient {
    /// Fetch a fresh CSRF token from `GET /v1/token`
    async fn csrf_token(&self) -> Result<String> {
        let url = format!("{}/token", self.api_root());
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "text/plain")
            .send()
            .await?;
        let response = check_status(response).await?;

        response
            .headers()
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| ClientError::ParseError(format!("missing {} header", CSRF_HEADER)))
    }

    /// Attach a CSRF token to a POST/PUT/DELETE request
    pub(crate) async fn with_csrf(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.csrf_token().await?;
        Ok(request.header(CSRF_HEADER, token))
    }
}
