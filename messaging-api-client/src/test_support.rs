// messaging-api-client/src/test_support.rs
use async_trait::async_trait;
use http::Method;
use messaging_api_common::{Exchange, HttpClient, HttpError, HttpRequest, RawResponse, RequestInfo};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport that records every request and replays queued answers
#[derive(Clone, Default)]
pub struct RecordingClient {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    answers: Arc<Mutex<VecDeque<Exchange>>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_json(self, body: Value) -> Self {
        self.respond(200, body)
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        let response = RawResponse {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: serde_json::to_vec(&body).unwrap(),
            request: RequestInfo {
                method: Method::GET,
                url: "https://recording.test/".to_string(),
            },
        };
        let exchange = if response.is_success() {
            Ok(response)
        } else {
            Err(HttpError::status(response))
        };
        self.answers.lock().unwrap().push_back(exchange);
        self
    }

    pub fn respond_err(self, err: HttpError) -> Self {
        self.answers.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    async fn send(&self, request: HttpRequest) -> Exchange {
        self.requests.lock().unwrap().push(request);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::network("no answer queued")))
    }
}
