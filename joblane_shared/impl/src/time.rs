use chrono::{DateTime, Utc};
use joblane_di::Build;
use joblane_shared_contracts::time::TimeService;

#[derive(Debug, Clone, Copy, Build)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
