//! Core type definitions: targets and probe outcomes.

mod result;
mod target;

pub use result::{ProbeResult, ProbeStatus};
pub use target::{NetworkHosts, TargetMode, TargetSpec, Targets};
