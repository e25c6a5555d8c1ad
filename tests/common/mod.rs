#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use portfolio_admin::{
    AppState,
    config::{AdminConfig, Config, MailConfig},
    mail::{DeliveryError, Mailer, OutgoingMail},
    router::create_router,
    store::{Collection, Document, DocumentStore, Filter, MemoryStore, Sort, StorageError},
};
use serde_json::Value;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct horse";
pub const SECRET: &str = "test-signing-secret";

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".into(),
        server_host: "127.0.0.1".into(),
        server_port: 0,
        api_base_uri: "/api/v1".into(),
        admin: AdminConfig {
            password: Some(PASSWORD.into()),
            password_hash: None,
            secret_key: Some(SECRET.into()),
            session_ttl_secs: 24 * 3600,
        },
        mail: MailConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: 587,
            username: "owner@example.com".into(),
            password: "app-password".into(),
            from_name: Some("Portfolio".into()),
            timeout_secs: 1,
        },
        cors_origins: vec!["http://localhost:5173".into()],
    }
}

/// Memory store that counts the calls reaching it. Updates can be made to
/// fail after they are counted.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    pub updates: AtomicUsize,
    pub writes: AtomicUsize,
    pub failing_updates: AtomicBool,
}

impl RecordingStore {
    pub fn fail_updates(&self) {
        self.failing_updates.store(true, Ordering::SeqCst);
    }

    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        sort: Option<&Sort>,
    ) -> Result<Vec<Document>, StorageError> {
        self.inner.find(collection, filter, sort).await
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StorageError> {
        self.inner.find_by_id(collection, id).await
    }

    async fn create(&self, collection: Collection, doc: Document) -> Result<Document, StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.create(collection, doc).await
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        patch: Document,
    ) -> Result<Option<Document>, StorageError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.failing_updates.load(Ordering::SeqCst) {
            return Err(StorageError::NotAnObject);
        }
        self.inner.update_by_id(collection, id, patch).await
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<bool, StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_by_id(collection, id).await
    }

    async fn count_documents(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<u64, StorageError> {
        self.inner.count_documents(collection, filter).await
    }
}

#[derive(Debug, Clone, Copy)]
pub enum MailBehavior {
    Succeed,
    Fail,
    Hang,
}

pub struct FakeMailer {
    behavior: MailBehavior,
    sent: Mutex<Vec<OutgoingMail>>,
}

impl FakeMailer {
    pub fn new(behavior: MailBehavior) -> Self {
        Self {
            behavior,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Every mail handed to the transport, whether or not it succeeded.
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(mail);
        match self.behavior {
            MailBehavior::Succeed => Ok(()),
            MailBehavior::Fail => Err(DeliveryError::Rejected("535 auth failed".into())),
            MailBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            }
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<RecordingStore>,
    pub mailer: Arc<FakeMailer>,
    pub state: AppState,
}

impl TestApp {
    pub fn new(behavior: MailBehavior) -> Self {
        Self::with_config(test_config(), behavior)
    }

    pub fn with_config(config: Config, behavior: MailBehavior) -> Self {
        let store = Arc::new(RecordingStore::default());
        let mailer = Arc::new(FakeMailer::new(behavior));
        let state = AppState::new(config, store.clone(), mailer.clone());
        Self {
            router: create_router(state.clone()),
            store,
            mailer,
            state,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("adminToken={}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn login(&self) -> String {
        let response = self
            .request(
                "POST",
                "/api/v1/auth/login",
                None,
                Some(serde_json::json!({"password": PASSWORD})),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        session_cookie(&response).expect("login sets the session cookie")
    }

    /// Stores a pending contact message and returns its id.
    pub async fn seed_message(&self) -> String {
        let doc = serde_json::json!({
            "name": "Visitor",
            "email": "x@example.com",
            "subject": "Hello",
            "message": "Are you available?",
            "status": "Pending"
        });
        let created = self
            .store
            .create(Collection::Messages, doc.as_object().cloned().unwrap())
            .await
            .unwrap();
        created["_id"].as_str().unwrap().to_string()
    }
}

/// Value of the `adminToken` cookie set by a response, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| {
            v.split(';')
                .next()
                .and_then(|pair| pair.trim().strip_prefix("adminToken="))
                .map(String::from)
        })
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
