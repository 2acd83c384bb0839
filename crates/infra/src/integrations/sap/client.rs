//! SAP REST client for authentication, commands and user lookups

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use sapbridge_core::{
    check_http_status, decode, CommandOutcome, DecodedEnvelope, SapCallError,
    SapClient as SapClientTrait, TransportKind,
};
use sapbridge_domain::constants::{
    COMMAND_PATH, PARAM_APP_ID, PARAM_COMMAND, PARAM_MAX_RESULTS, PARAM_SAP_CLIENT, PARAM_SEARCH,
    USER_INFO_PATH, USER_LIST_PATH,
};
use sapbridge_domain::{
    Credential, SapBridgeError, SapCommand, SapConfig, SapUser, SapUserInfo, SessionCookies,
    UserQuery,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use super::jar::SessionJar;
use crate::errors::InfraError;
use crate::http::HttpClient;

const USER_AGENT: &str = concat!("sapbridge/", env!("CARGO_PKG_VERSION"));

/// SAP REST client
///
/// Holds only configuration. Each call builds its own transport around a
/// fresh [`SessionJar`], so concurrent calls never share cookies.
#[derive(Debug, Clone)]
pub struct SapClient {
    base_url: Url,
    app_id: String,
    sap_client: String,
    timeout: Duration,
}

/// `user-info` payload
#[derive(Debug, Default, Deserialize)]
struct UserInfoPayload {
    #[serde(rename = "USER_DATA", default)]
    user_data: UserData,
}

#[derive(Debug, Default, Deserialize)]
struct UserData {
    #[serde(rename = "USERNAME", default)]
    user_id: String,
}

/// One outbound request.
struct Call<'a> {
    correlation_id: Uuid,
    method: Method,
    path: &'static str,
    query: &'a [(&'static str, &'a str)],
    body: Option<&'a Value>,
    credential: Option<&'a Credential>,
}

/// Raw response plus the session cookies the jar held afterwards.
struct Exchange {
    status: StatusCode,
    body: Vec<u8>,
    cookies: SessionCookies,
}

impl Exchange {
    fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("unknown status")
    }

    fn decode<T>(&self) -> Result<DecodedEnvelope<T>, SapCallError>
    where
        T: DeserializeOwned + Default,
    {
        decode(self.status.as_u16(), self.status_text(), &self.body)
    }
}

impl SapClient {
    /// Create a client from SAP configuration.
    ///
    /// # Errors
    /// Returns `SapBridgeError::Config` if the base URL is not an absolute
    /// `http`/`https` URL.
    pub fn new(config: &SapConfig) -> Result<Self, SapBridgeError> {
        Ok(Self {
            base_url: parse_base_url(&config.base_url)?,
            app_id: config.app_id.clone(),
            sap_client: config.sap_client.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Execute a command and decode its `DATA` into `T`.
    pub async fn send_command_as<T>(
        &self,
        command: &SapCommand,
    ) -> Result<CommandOutcome<T>, SapCallError>
    where
        T: DeserializeOwned + Default,
    {
        let correlation_id = Uuid::new_v4();
        let query = [
            (PARAM_APP_ID, self.app_id.as_str()),
            (PARAM_COMMAND, command.name.as_str()),
            (PARAM_SAP_CLIENT, self.sap_client.as_str()),
        ];

        let result = self
            .exchange(Call {
                correlation_id,
                method: Method::POST,
                path: COMMAND_PATH,
                query: &query,
                body: Some(&command.payload),
                credential: command.credential.as_ref(),
            })
            .await
            .and_then(|exchange| exchange.decode::<T>());

        match result {
            Ok(DecodedEnvelope { envelope, data }) => {
                info!(%correlation_id, command = %command.name, "SAP command succeeded");
                Ok(CommandOutcome { envelope, data })
            }
            Err(err) => {
                log_failure(correlation_id, "command", &err);
                Err(err)
            }
        }
    }

    async fn exchange(&self, call: Call<'_>) -> Result<Exchange, SapCallError> {
        let url = self.endpoint(call.path, call.query)?;
        let jar = Arc::new(SessionJar::for_credential(call.credential));

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(json_headers())
            .cookie_provider(Arc::clone(&jar))
            .build()?;

        let mut request = http.request(call.method, url);
        if let Some(Credential::Basic { value }) = call.credential {
            request = request.header(AUTHORIZATION, basic_header(value)?);
        }
        if let Some(body) = call.body {
            request = request.json(body);
        }

        debug!(
            correlation_id = %call.correlation_id,
            path = call.path,
            credential = call.credential.map_or("none", Credential::kind),
            "calling SAP"
        );

        let response = http.send(request).await?;
        let status = response.status();
        let body = response.bytes().await.map_err(InfraError::from)?;

        debug!(
            correlation_id = %call.correlation_id,
            status = status.as_u16(),
            bytes = body.len(),
            "SAP responded"
        );

        Ok(Exchange { status, body: body.to_vec(), cookies: jar.session_cookies() })
    }

    /// Resolve `path` against the base URL, skipping empty query values.
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, SapCallError> {
        let mut url = self.base_url.join(path).map_err(|e| {
            SapCallError::transport(
                TransportKind::Request,
                format!("invalid SAP endpoint {path}: {e}"),
            )
        })?;

        let params: Vec<_> = query.iter().filter(|(_, value)| !value.is_empty()).collect();
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl SapClientTrait for SapClient {
    async fn authenticate(&self, credential: &Credential) -> Result<SapUser, SapCallError> {
        let correlation_id = Uuid::new_v4();
        let query = [(PARAM_SAP_CLIENT, self.sap_client.as_str())];

        let exchange = self
            .exchange(Call {
                correlation_id,
                method: Method::GET,
                path: USER_INFO_PATH,
                query: &query,
                body: None,
                credential: Some(credential),
            })
            .await;

        let result = exchange.and_then(|exchange| {
            let decoded = exchange.decode::<UserInfoPayload>()?;
            Ok(SapUser { user_id: decoded.data.user_data.user_id, cookies: exchange.cookies })
        });

        match result {
            Ok(user) => {
                info!(
                    %correlation_id,
                    user_id = %user.user_id,
                    session_complete = user.cookies.is_complete(),
                    "SAP authentication succeeded"
                );
                Ok(user)
            }
            Err(err) => {
                log_failure(correlation_id, "authenticate", &err);
                Err(err)
            }
        }
    }

    async fn send_command(
        &self,
        command: &SapCommand,
    ) -> Result<CommandOutcome<Value>, SapCallError> {
        self.send_command_as::<Value>(command).await
    }

    async fn list_users(
        &self,
        query: &UserQuery,
        credential: &Credential,
    ) -> Result<Vec<SapUserInfo>, SapCallError> {
        let correlation_id = Uuid::new_v4();
        let max_results = query.max_results.to_string();
        let params = [
            (PARAM_SEARCH, query.search.as_str()),
            (PARAM_MAX_RESULTS, max_results.as_str()),
            (PARAM_SAP_CLIENT, self.sap_client.as_str()),
        ];

        let exchange = self
            .exchange(Call {
                correlation_id,
                method: Method::GET,
                path: USER_LIST_PATH,
                query: &params,
                body: None,
                credential: Some(credential),
            })
            .await;

        // user-list answers with a bare array, not an envelope
        let result = exchange.and_then(|exchange| {
            check_http_status(i64::from(exchange.status.as_u16()), exchange.status_text())?;
            serde_json::from_slice::<Option<Vec<SapUserInfo>>>(&exchange.body)
                .map(Option::unwrap_or_default)
                .map_err(|e| SapCallError::Payload(e.to_string()))
        });

        match result {
            Ok(users) => {
                info!(%correlation_id, count = users.len(), "SAP user list fetched");
                Ok(users)
            }
            Err(err) => {
                log_failure(correlation_id, "list_users", &err);
                Err(err)
            }
        }
    }
}

fn log_failure(correlation_id: Uuid, operation: &'static str, err: &SapCallError) {
    warn!(%correlation_id, operation, category = err.category(), error = %err, "SAP call failed");
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

fn basic_header(value: &str) -> Result<HeaderValue, SapCallError> {
    let mut header = HeaderValue::from_str(&format!("Basic {value}")).map_err(|_| {
        SapCallError::transport(
            TransportKind::Request,
            "Basic credential is not a valid header value",
        )
    })?;
    header.set_sensitive(true);
    Ok(header)
}

/// Parse the configured base URL, making sure relative joins stay under it.
fn parse_base_url(raw: &str) -> Result<Url, SapBridgeError> {
    let trimmed = raw.trim();
    let normalized =
        if trimmed.ends_with('/') { trimmed.to_string() } else { format!("{trimmed}/") };

    let url = Url::parse(&normalized)
        .map_err(|e| SapBridgeError::Config(format!("Invalid SAP base URL '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SapBridgeError::Config(format!("Unsupported SAP base URL scheme: {other}"))),
    }
}
