use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

use assetdesk_auth::SessionToken;

use crate::exchange::{CredentialExchange, Credentials, ExchangeError, ExchangeGrant};

/// HTTP credential exchange.
///
/// Wire contract: `POST {base}/login` carrying `{ userName, password }` and
/// `POST {base}/refresh` carrying `{ token }`; both answer a grant
/// `{ token, identity, expiresAt? }` on success and 401 on rejection. The
/// same contract is spoken by the identity provider and by the edge service,
/// so a UI shell can point this client at either.
#[derive(Debug, Clone)]
pub struct HttpCredentialExchange {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    token: &'a str,
}

impl HttpCredentialExchange {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn grant_from(res: reqwest::Response) -> Result<ExchangeGrant, ExchangeError> {
        let status = res.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ExchangeError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(ExchangeError::ServerError(format!(
                "unexpected status {status}"
            )));
        }
        res.json::<ExchangeGrant>()
            .await
            .map_err(|e| ExchangeError::ServerError(format!("malformed grant: {e}")))
    }
}

#[async_trait]
impl CredentialExchange for HttpCredentialExchange {
    async fn authenticate(&self, credentials: &Credentials) -> Result<ExchangeGrant, ExchangeError> {
        let res = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(credentials)
            .send()
            .await
            .map_err(|e| ExchangeError::NetworkFailure(e.to_string()))?;
        Self::grant_from(res).await
    }

    async fn refresh(&self, token: &SessionToken) -> Result<ExchangeGrant, ExchangeError> {
        let res = self
            .client
            .post(format!("{}/refresh", self.base_url))
            .json(&RefreshRequest {
                token: token.as_str(),
            })
            .send()
            .await
            .map_err(|e| ExchangeError::NetworkFailure(e.to_string()))?;
        Self::grant_from(res).await
    }
}
