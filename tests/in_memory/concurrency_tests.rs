//! Concurrent callers share one board and never reuse task identifiers.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::helpers::{open, seed, store};
use rstest::rstest;
use taskboard::board::{adapters::memory::InMemorySnapshotStore, services::CreateTaskRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_ids(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = Arc::new(open(&store).await?);
    seed(&service).await?;

    let handles: Vec<_> = (0..16)
        .map(|index| {
            let tracker = Arc::clone(&service);
            tokio::spawn(async move {
                tracker
                    .create_task(CreateTaskRequest::new(
                        format!("Task {index}"),
                        "Concurrent",
                        "qa1",
                        "tester",
                    ))
                    .await
                    .map(|task| task.id())
            })
        })
        .collect();

    let mut ids = BTreeSet::new();
    for handle in handles {
        ids.insert(handle.await??);
    }

    eyre::ensure!(ids.len() == 16, "expected 16 distinct ids, got {}", ids.len());
    let qa = service
        .get_user_with_tasks("qa1")
        .await
        .ok_or_else(|| eyre::eyre!("qa1 missing"))?;
    eyre::ensure!(qa.assigned_task_ids.len() == 16, "qa1 task cache incomplete");
    eyre::ensure!(store.save_count()? == 3 + 16, "every create must be saved");
    Ok(())
}
