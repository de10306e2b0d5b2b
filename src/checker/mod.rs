//! Link checker module - the concurrent link-validation engine
//!
//! This module contains the core audit logic:
//! - HTML parsing and candidate link extraction
//! - Single-link probing with HEAD to GET fallback and redirect tracking
//! - Bounded-concurrency execution of probes
//! - Audit coordination and report assembly

mod coordinator;
mod fetcher;
mod gate;
mod parser;
mod probe;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{AuditReport, Auditor, TIMESTAMP_FORMAT};
pub use fetcher::{
    build_http_client, fetch_page, FetchedPage, HopResponse, HttpTransport, Transport,
    TransportFailure,
};
pub use gate::ConcurrencyGate;
pub use parser::{extract_links, truncate_anchor, CandidateLink, MAX_ANCHOR_CHARS};
pub use probe::{LinkProbe, ProbeMethod, ProbeResult};
