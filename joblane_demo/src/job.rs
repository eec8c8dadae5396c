use std::sync::LazyLock;

use chrono::{TimeZone, Utc};
use joblane_models::job::{Job, JobType};
use joblane_persistence_contracts::job::JobRepository;

use crate::user::{BAR, FOO};

pub static ALL_JOBS: LazyLock<Vec<&Job>> =
    LazyLock::new(|| vec![&FOO_JOB, &FOO_JOB_2, &BAR_JOB]);

pub static FOO_JOB: LazyLock<Job> = LazyLock::new(|| Job {
    id: "0c9c3d1f-6f7a-4a7e-9f3e-3f6b7c2d1a4e".try_into().unwrap(),
    user_id: FOO.clone(),
    title: "Backend Engineer".try_into().unwrap(),
    company: "Acme".try_into().unwrap(),
    description: "Build great APIs for our customers".try_into().unwrap(),
    location: "Remote".try_into().unwrap(),
    job_type: JobType::FullTime,
    created_at: Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap(),
    updated_at: Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap(),
});

pub static FOO_JOB_2: LazyLock<Job> = LazyLock::new(|| Job {
    id: "5b7d9c2e-8a1f-43d2-b3c4-d5e6f7a8b9c0".try_into().unwrap(),
    user_id: FOO.clone(),
    title: "Senior Backend Engineer".try_into().unwrap(),
    company: "Acme".try_into().unwrap(),
    description: "Own the payment pipeline end to end".try_into().unwrap(),
    location: "Berlin".try_into().unwrap(),
    job_type: JobType::Contract,
    created_at: Utc.with_ymd_and_hms(2024, 4, 1, 8, 15, 0).unwrap(),
    updated_at: Utc.with_ymd_and_hms(2024, 4, 3, 17, 42, 0).unwrap(),
});

pub static BAR_JOB: LazyLock<Job> = LazyLock::new(|| Job {
    id: "9e8d7c6b-5a49-4382-9170-6f5e4d3c2b1a".try_into().unwrap(),
    user_id: BAR.clone(),
    title: "Barista".try_into().unwrap(),
    company: "Beanhouse".try_into().unwrap(),
    description: "Pull shots and keep the regulars happy".try_into().unwrap(),
    location: "Lisbon".try_into().unwrap(),
    job_type: JobType::PartTime,
    created_at: Utc.with_ymd_and_hms(2024, 6, 28, 3, 14, 15).unwrap(),
    updated_at: Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap(),
});

pub async fn create<Txn: Send + Sync + 'static>(
    txn: &mut Txn,
    repo: impl JobRepository<Txn>,
) -> anyhow::Result<()> {
    for &job in &*ALL_JOBS {
        repo.create(txn, job).await?;
    }
    Ok(())
}
