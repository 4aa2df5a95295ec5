// src/services/scheduler.rs
use anyhow::{anyhow, Result};
use log::{error, info};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use super::build_hook::BuildHookTrigger;

/// Daily at 00:00 UTC (sec min hour day month weekday).
pub const DEFAULT_BUILD_SCHEDULE: &str = "0 0 0 * * *";

fn build_job(trigger: Arc<BuildHookTrigger>, schedule: &str) -> Result<Job> {
    Job::new_async(schedule, move |_uuid, _lock| {
        let trigger = trigger.clone();
        Box::pin(async move {
            info!("Scheduled build trigger firing");
            let outcome = trigger.trigger().await;
            if outcome.report.ok {
                info!("Scheduled build triggered, upstream status {:?}", outcome.report.status);
            } else {
                error!("Scheduled build trigger failed: {:?}", outcome.report.error);
            }
        })
    })
    .map_err(|e| anyhow!("invalid build schedule {:?}: {:?}", schedule, e))
}

/// Registers the daily build trigger and starts the scheduler. The returned
/// handle must be kept alive for the job to keep running.
pub async fn start_build_schedule(
    trigger: Arc<BuildHookTrigger>,
    schedule: &str,
) -> Result<JobScheduler> {
    let job = build_job(trigger, schedule)?;
    let sched = JobScheduler::new()
        .await
        .map_err(|e| anyhow!("failed to create scheduler: {:?}", e))?;
    sched
        .add(job)
        .await
        .map_err(|e| anyhow!("failed to add build job: {:?}", e))?;
    sched
        .start()
        .await
        .map_err(|e| anyhow!("failed to start scheduler: {:?}", e))?;
    info!("Build trigger scheduled with cron {:?} (UTC)", schedule);
    Ok(sched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_schedule_parses() {
        let trigger = Arc::new(BuildHookTrigger::new(None));
        assert!(build_job(trigger, DEFAULT_BUILD_SCHEDULE).is_ok());
    }

    #[tokio::test]
    async fn malformed_schedule_is_rejected() {
        let trigger = Arc::new(BuildHookTrigger::new(None));
        assert!(start_build_schedule(trigger, "every midnight").await.is_err());
    }
}
