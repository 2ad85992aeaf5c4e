//! Shared fakes and helpers for router tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use bbridge_core::ports::{
    CatalogError, EventStream, InvokeError, ModelCatalogPort, ModelInvokerPort,
};
use bbridge_core::{ApiKeyVerifier, FoundationModel, GatewayService, ModelLifecycle, ModelResolver};
use bbridge_proxy::{AppState, create_router};
use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream;
use http_body_util::BodyExt;
use serde_json::Value;

pub const DEFAULT_MODEL: &str = "us.anthropic.claude-3-7-sonnet-20250219-v1:0";
pub const DEFAULT_EMBEDDING_MODEL: &str = "cohere.embed-multilingual-v3";
pub const API_KEY: &str = "sk-test-key";

/// One recorded backend call.
#[derive(Debug, Clone)]
pub struct Call {
    pub model_id: String,
    pub body: Value,
    pub streaming: bool,
}

/// Backend fake that replays a fixed response or event list.
#[derive(Default)]
pub struct ScriptedInvoker {
    pub response: &'static str,
    pub events: Vec<&'static str>,
    pub failure: Option<(u16, &'static str)>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedInvoker {
    pub fn replying(response: &'static str) -> Self {
        Self {
            response,
            ..Self::default()
        }
    }

    pub fn streaming(events: Vec<&'static str>) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    pub fn failing(status: u16, message: &'static str) -> Self {
        Self {
            failure: Some((status, message)),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, model_id: &str, body: &Bytes, streaming: bool) -> Result<(), InvokeError> {
        self.calls.lock().unwrap().push(Call {
            model_id: model_id.to_string(),
            body: serde_json::from_slice(body).unwrap(),
            streaming,
        });
        match self.failure {
            Some((status, message)) => Err(InvokeError::Backend {
                status: Some(status),
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ModelInvokerPort for ScriptedInvoker {
    async fn invoke(&self, model_id: &str, body: Bytes) -> Result<Bytes, InvokeError> {
        self.record(model_id, &body, false)?;
        Ok(Bytes::from_static(self.response.as_bytes()))
    }

    async fn invoke_stream(&self, model_id: &str, body: Bytes) -> Result<EventStream, InvokeError> {
        self.record(model_id, &body, true)?;
        let items: Vec<Result<Bytes, InvokeError>> = self
            .events
            .iter()
            .map(|e| Ok(Bytes::from_static(e.as_bytes())))
            .collect();
        Ok(stream::iter(items).boxed())
    }
}

/// Catalog fake with a fixed model and profile list.
#[derive(Default)]
pub struct StaticCatalog {
    pub models: Vec<FoundationModel>,
    pub profiles: Vec<String>,
}

#[async_trait]
impl ModelCatalogPort for StaticCatalog {
    async fn list_foundation_models(&self) -> Result<Vec<FoundationModel>, CatalogError> {
        Ok(self.models.clone())
    }

    async fn list_inference_profiles(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.profiles.clone())
    }
}

pub fn text_model(id: &str) -> FoundationModel {
    FoundationModel {
        id: id.to_string(),
        input_modalities: vec!["text".to_string()],
        streaming_supported: true,
        lifecycle: ModelLifecycle::Active,
    }
}

/// Router with the given fakes and a static API key.
pub fn app(invoker: Arc<ScriptedInvoker>) -> Router {
    app_with(invoker, StaticCatalog::default(), ApiKeyVerifier::with_static_key(API_KEY))
}

pub fn app_with(
    invoker: Arc<ScriptedInvoker>,
    catalog: StaticCatalog,
    verifier: ApiKeyVerifier,
) -> Router {
    let resolver = ModelResolver::new(DEFAULT_MODEL, DEFAULT_EMBEDDING_MODEL, "us-east-1");
    let gateway = GatewayService::new(invoker, Arc::new(catalog), resolver);
    create_router(AppState::new(gateway, verifier))
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {API_KEY}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {API_KEY}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
