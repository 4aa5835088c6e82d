//! Test doubles for the request pipeline.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::auth::MemoryStore;
use crate::http::client::ApiClient;
use crate::http::hooks::{Navigator, Notifier};
use crate::http::request::PreparedRequest;
use crate::http::transport::{RawResponse, Transport, TransportError};
use crate::models::ClientConfig;

/// Transport replaying scripted results and recording what it was sent.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    sent: Mutex<Vec<PreparedRequest>>,
}

impl FakeTransport {
    pub fn reply_json(&self, value: Value) {
        self.reply_raw(200, value.to_string().into_bytes());
    }

    pub fn reply_raw(&self, status: u16, body: Vec<u8>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(RawResponse { status, body }));
    }

    pub fn fail(&self, error: TransportError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn sent(&self) -> Vec<PreparedRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> PreparedRequest {
        self.sent().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        self.sent.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::NoResponse("nothing scripted".into())))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub visits: Mutex<Vec<(String, Duration)>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<(String, Duration)> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str, delay: Duration) {
        self.visits.lock().unwrap().push((path.to_string(), delay));
    }
}

/// A client wired to fakes, plus handles to inspect them.
pub struct Harness {
    pub client: ApiClient,
    pub transport: Arc<FakeTransport>,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness() -> Harness {
    let transport = Arc::new(FakeTransport::default());
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let client = ApiClient::new(&ClientConfig::default(), transport.clone(), store.clone())
        .with_notifier(notifier.clone())
        .with_navigator(navigator.clone());
    Harness {
        client,
        transport,
        store,
        notifier,
        navigator,
    }
}
