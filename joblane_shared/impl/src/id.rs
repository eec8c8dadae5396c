use std::fmt::Debug;

use joblane_di::Build;
use joblane_shared_contracts::id::IdService;
use joblane_utils::trace_instrument;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Build)]
pub struct IdServiceImpl;

impl IdService for IdServiceImpl {
    #[trace_instrument(skip(self))]
    fn generate<I: From<Uuid> + Debug>(&self) -> I {
        Uuid::new_v4().into()
    }
}
