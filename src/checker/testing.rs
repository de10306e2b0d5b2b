//! Scripted transport for unit tests

use crate::checker::fetcher::{HopResponse, Transport, TransportFailure};
use crate::checker::parser::CandidateLink;
use crate::checker::probe::ProbeMethod;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// What the mock does for one (method, url) pair
#[derive(Debug, Clone)]
pub enum Scripted {
    Respond(HopResponse),
    Fail(TransportFailure),
    Hang,
    Panic,
}

impl Scripted {
    pub fn status(status: u16) -> Self {
        Self::Respond(HopResponse {
            status,
            location: None,
            content_type: "text/html".to_string(),
        })
    }

    pub fn redirect(status: u16, location: &str) -> Self {
        Self::Respond(HopResponse {
            status,
            location: Some(location.to_string()),
            content_type: String::new(),
        })
    }
}

/// Transport answering from a script; unscripted requests get a 200
#[derive(Debug, Default)]
pub struct MockTransport {
    script: HashMap<(ProbeMethod, String), Scripted>,
    delay: Duration,
    calls: Mutex<Vec<(ProbeMethod, String)>>,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, method: ProbeMethod, url: &str, outcome: Scripted) -> Self {
        self.script.insert((method, url.to_string()), outcome);
        self
    }

    /// Makes every request take at least `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<(ProbeMethod, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Highest number of requests observed in flight at once
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

impl Transport for MockTransport {
    async fn send(&self, method: ProbeMethod, url: &Url) -> Result<HopResponse, TransportFailure> {
        self.calls.lock().unwrap().push((method, url.to_string()));
        let outcome = self
            .script
            .get(&(method, url.to_string()))
            .cloned()
            .unwrap_or_else(|| Scripted::status(200));

        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        match outcome {
            Scripted::Respond(response) => Ok(response),
            Scripted::Fail(failure) => Err(failure),
            Scripted::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(TransportFailure::Timeout("mock hang elapsed".to_string()))
            }
            Scripted::Panic => panic!("scripted transport panic for {}", url),
        }
    }
}

pub fn candidate(url: &str, anchor_text: &str) -> CandidateLink {
    CandidateLink {
        url: Url::parse(url).unwrap(),
        anchor_text: anchor_text.to_string(),
    }
}
