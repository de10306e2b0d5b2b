//! Bounded-concurrency execution of link probes
//!
//! Every candidate gets its own task, but a task must hold a permit from a
//! shared semaphore before it sends anything. At most `max_concurrent` probes
//! are therefore in flight at any instant.

use crate::checker::fetcher::Transport;
use crate::checker::parser::CandidateLink;
use crate::checker::probe::{LinkProbe, ProbeResult};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Runs probes with a global in-flight limit
pub struct ConcurrencyGate {
    /// Permits for in-flight probes
    semaphore: Arc<Semaphore>,

    /// Permit count, kept for logging
    capacity: usize,
}

impl ConcurrencyGate {
    /// Creates a gate admitting `max_concurrent` probes at once
    ///
    /// The capacity is kept within `1..=Semaphore::MAX_PERMITS`.
    pub fn new(max_concurrent: usize) -> Self {
        let capacity = max_concurrent.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Returns the number of probes allowed in flight
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Probes every candidate and returns one result per candidate
    ///
    /// # Arguments
    ///
    /// * `probe` - The shared probe
    /// * `candidates` - Links to probe
    ///
    /// # Returns
    ///
    /// Results in the same order as `candidates`. A probe task that panics
    /// is reported as a failed result for its link; the others are unaffected.
    pub async fn run<T: Transport>(
        &self,
        probe: Arc<LinkProbe<T>>,
        candidates: &[CandidateLink],
    ) -> Vec<ProbeResult> {
        if candidates.is_empty() {
            return Vec::new();
        }

        tracing::info!(
            "Probing {} links with up to {} concurrent requests",
            candidates.len(),
            self.capacity
        );

        let handles: Vec<_> = candidates
            .iter()
            .cloned()
            .map(|candidate| {
                let semaphore = Arc::clone(&self.semaphore);
                let probe = Arc::clone(&probe);
                tokio::spawn(async move {
                    let Ok(_permit) = semaphore.acquire_owned().await else {
                        let link_type = probe.link_type(&candidate.url);
                        return ProbeResult::aborted(
                            &candidate,
                            link_type,
                            "probe cancelled: concurrency gate closed".to_string(),
                        );
                    };
                    probe.probe(&candidate).await
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (handle, candidate) in handles.into_iter().zip(candidates) {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!("Probe task for {} failed: {}", candidate.url, e);
                    let link_type = probe.link_type(&candidate.url);
                    let message = if e.is_panic() {
                        "probe failed unexpectedly: internal error"
                    } else {
                        "probe cancelled"
                    };
                    ProbeResult::aborted(candidate, link_type, message.to_string())
                }
            };
            results.push(result);
        }

        results
    }
}
