use bon::Builder;
use core::fmt;
#[cfg(feature = "leaky-bucket")]
use leaky_bucket::RateLimiter;
use reqwest::StatusCode;
#[cfg(feature = "leaky-bucket")]
use std::sync::Arc;

use crate::{
    error::{self, TwilioRequestError},
    token::{TokenRequest, TokenResponse},
};

const BASE_URL: &str = "https://api.twilio.com";
const API_VERSION: &str = "2010-04-01";

/// Twilio Network Traversal Service client.
#[derive(Clone, Builder)]
pub struct Twilio {
    /// Account SID, used both for authentication and in the request path.
    #[builder(into)]
    pub(crate) account_sid: String,
    /// Auth token paired with the account SID for HTTP Basic auth.
    #[builder(into)]
    pub(crate) auth_token: String,
    /// HTTP client for making requests.
    #[builder(default)]
    pub(crate) client: reqwest::Client,
    /// Rate limiter acquired before each send (pacing only, no retries).
    #[cfg(feature = "leaky-bucket")]
    pub(crate) leaky_bucket: Option<Arc<RateLimiter>>,
    /// Base URL for the API (allows pointing at a test server).
    #[builder(default = BASE_URL.to_string(), into)]
    pub(crate) base_url: String,
    /// API version segment of the request path.
    #[builder(default = API_VERSION.to_string(), into)]
    pub(crate) api_version: String,
}

impl Twilio {
    /// Create a new Twilio client with the provided credentials.
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            client: reqwest::Client::new(),
            #[cfg(feature = "leaky-bucket")]
            leaky_bucket: None,
            base_url: BASE_URL.to_string(),
            api_version: API_VERSION.to_string(),
        }
    }

    /// Create a client from the `TWILIO_ACCOUNT_SID` and `TWILIO_AUTH_TOKEN`
    /// environment variables.
    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID")?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN")?;
        Ok(Self::builder()
            .account_sid(account_sid)
            .auth_token(auth_token)
            .build())
    }

    /// Account SID this client requests tokens for.
    #[must_use]
    pub fn account_sid(&self) -> &str {
        &self.account_sid
    }

    /// Base URL for the API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a fresh set of NTS credentials.
    ///
    /// Issues `POST /{version}/Accounts/{AccountSid}/Tokens.json`, with the
    /// requested `Ttl` as a query parameter when one was set. The endpoint
    /// answers `201 Created` with a [`TokenResponse`] body; any other status
    /// carries Twilio's error envelope and is surfaced as
    /// [`TwilioRequestError::Api`]. No retries are performed at this layer.
    pub async fn create_token(
        &self,
        request: &TokenRequest,
    ) -> Result<TokenResponse, TwilioRequestError> {
        #[cfg(feature = "leaky-bucket")]
        if let Some(ref limiter) = self.leaky_bucket {
            limiter.acquire_one().await;
        }

        let url = format!(
            "{}/{}/Accounts/{}/Tokens.json",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            self.account_sid
        );

        let res = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .query(request)
            .send()
            .await?;

        let status = res.status();
        let bytes = res.bytes().await?;

        if status == StatusCode::CREATED {
            match serde_json::from_slice::<TokenResponse>(&bytes) {
                Ok(token) => Ok(token),
                Err(err) => {
                    let body = String::from_utf8_lossy(&bytes);
                    log::warn!("failed to decode NTS token response: {err}; body: {body}");
                    Err(TwilioRequestError::UnexpectedResponse(format!(
                        "HTTP {} but failed to decode token response: {err}; body: {body}",
                        status.as_u16()
                    )))
                }
            }
        } else {
            Err(error::parse_error_response(status, bytes))
        }
    }
}

#[cfg(feature = "leaky-bucket")]
impl Twilio {
    /// Set a shared rate limiter acquired before each request.
    #[must_use]
    pub fn with_rate_limiter(mut self, rate_limiter: Arc<RateLimiter>) -> Self {
        self.leaky_bucket = Some(rate_limiter);
        self
    }
}

impl fmt::Debug for Twilio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Twilio")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}
