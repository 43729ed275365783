//! Nullable verifier: scripted results, recorded requests.

use async_trait::async_trait;
use facegate_types::{Identifier, TransportFailure, VerificationResult};
use facegate_verification::{classify_body, EvidencePayload, Verifier};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A verifier that answers from a script and records every payload it receives.
pub struct NullVerifier {
    responses: Mutex<VecDeque<VerificationResult>>,
    requests: Mutex<Vec<EvidencePayload>>,
}

impl NullVerifier {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a raw result.
    pub fn push(&self, result: VerificationResult) {
        self.responses.lock().unwrap().push_back(result);
    }

    /// Queue the classification of a JSON body, as the real client would derive it.
    pub fn push_body(&self, body: serde_json::Value) {
        self.push(classify_body(body));
    }

    pub fn with_body(self, body: serde_json::Value) -> Self {
        self.push_body(body);
        self
    }

    pub fn with_result(self, result: VerificationResult) -> Self {
        self.push(result);
        self
    }

    /// All payloads submitted so far.
    pub fn requests(&self) -> Vec<EvidencePayload> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Identifiers submitted so far, in order.
    pub fn identifiers(&self) -> Vec<Identifier> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.identifier().clone())
            .collect()
    }
}

impl Default for NullVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Verifier for NullVerifier {
    async fn verify(&self, payload: EvidencePayload) -> VerificationResult {
        self.requests.lock().unwrap().push(payload);
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            TransportFailure::Network {
                detail: "null verifier has no scripted response".into(),
            }
            .into()
        })
    }
}
