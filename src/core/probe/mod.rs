//! HTTP(S) reachability probing.

mod client;
mod result;

pub use client::Prober;
pub use result::{classify, ProbeFailure, ProbeResult, ProbeState};
