//! Shared fixtures for gateway integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use parking_lot::Mutex;
use sapbridge_api::{build_router, AppContext};
use sapbridge_core::{CommandOutcome, SapCallError, SapClient};
use sapbridge_domain::{
    AuthConfig, Config, Credential, DateConfig, Envelope, SapCommand, SapConfig, SapUser,
    SapUserInfo, ServerConfig, SessionCookies, UserQuery,
};
use sapbridge_infra::HmacTokenValidator;
use serde_json::Value;

pub const SECRET: &str = "gateway-test-secret";

/// A call observed by [`FakeSap`].
#[derive(Debug, Clone, PartialEq)]
pub enum SapCall {
    Authenticate(Credential),
    Command(SapCommand),
    Users(UserQuery, Credential),
}

/// In-memory SAP backend that records what the gateway asked of it.
#[derive(Default)]
pub struct FakeSap {
    calls: Mutex<Vec<SapCall>>,
    failure: Mutex<Option<SapCallError>>,
    command_data: Mutex<Value>,
    users: Mutex<Vec<SapUserInfo>>,
}

impl FakeSap {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_with(&self, err: SapCallError) {
        *self.failure.lock() = Some(err);
    }

    pub fn answer_commands_with(&self, data: Value) {
        *self.command_data.lock() = data;
    }

    pub fn answer_users_with(&self, users: Vec<SapUserInfo>) {
        *self.users.lock() = users;
    }

    pub fn calls(&self) -> Vec<SapCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: SapCall) -> Result<(), SapCallError> {
        self.calls.lock().push(call);
        match self.failure.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SapClient for FakeSap {
    async fn authenticate(&self, credential: &Credential) -> Result<SapUser, SapCallError> {
        self.record(SapCall::Authenticate(credential.clone()))?;

        let cookies: SessionCookies = match credential {
            Credential::CookieSession { cookies } => cookies.clone(),
            Credential::Basic { .. } => {
                [("MYSAPSSO2", "fresh-sso"), ("SAP_SESSIONID_BID_100", "fresh-sid")]
                    .into_iter()
                    .collect()
            }
        };
        Ok(SapUser { user_id: "JDOE".into(), cookies })
    }

    async fn send_command(
        &self,
        command: &SapCommand,
    ) -> Result<CommandOutcome<Value>, SapCallError> {
        self.record(SapCall::Command(command.clone()))?;
        Ok(CommandOutcome {
            envelope: Envelope::default(),
            data: self.command_data.lock().clone(),
        })
    }

    async fn list_users(
        &self,
        query: &UserQuery,
        credential: &Credential,
    ) -> Result<Vec<SapUserInfo>, SapCallError> {
        self.record(SapCall::Users(query.clone(), credential.clone()))?;
        Ok(self.users.lock().clone())
    }
}

pub fn test_config() -> Config {
    Config {
        sap: SapConfig {
            base_url: "http://sap.invalid/api/".into(),
            app_id: "TIMESHEET".into(),
            sap_client: "100".into(),
            timeout_seconds: 5,
        },
        auth: AuthConfig { api_secret: SECRET.into(), enforce_expiry: false },
        server: ServerConfig::default(),
        dates: DateConfig::default(),
    }
}

/// Router wired to a [`FakeSap`] and the real HMAC validator.
pub fn router(sap: Arc<FakeSap>) -> Router {
    let config = test_config();
    let tokens = Arc::new(HmacTokenValidator::from_config(&config.auth));
    let ctx = AppContext::with_ports(config, sap, tokens).unwrap();
    build_router(Arc::new(ctx))
}

/// Sign a Bearer token carrying the given `accesses` map.
pub fn bearer_token(accesses: Value, secret: &str) -> String {
    let claims = serde_json::json!({ "sub": "JDOE", "accesses": accesses });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

pub fn request(method: &str, uri: &str, authorization: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(body).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
