use joblane_persistence_contracts::job::JobRepository;

pub mod job;
pub mod user;

pub async fn create<Txn: Send + Sync + 'static>(
    txn: &mut Txn,
    job_repo: impl JobRepository<Txn>,
) -> anyhow::Result<()> {
    job::create(txn, job_repo).await
}
