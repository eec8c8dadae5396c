//! `tracing`-backed implementations of the telemetry ports. Entries land as
//! structured log events; a deployment that needs a real audit store or push
//! notifications swaps these for its own implementations.

pub mod audit;
pub mod notification;
pub mod view;
