//! Ports for the non-critical side effects of the job services. Implementors
//! must never make the primary operation fail: callers log and discard any
//! error returned here.

pub mod audit;
pub mod notification;
pub mod view;
