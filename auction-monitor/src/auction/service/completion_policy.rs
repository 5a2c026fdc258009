use {
    super::monitor_auction::MonitorOutcome,
    crate::{
        auction::{
            entities::AuctionId,
            repository::{
                Repository,
                StoreError,
            },
        },
        config::CompletionOptions,
    },
    async_trait::async_trait,
    std::{
        fmt::Debug,
        sync::Arc,
        time::Duration,
    },
    tokio_util::sync::CancellationToken,
};

/// How a monitor performs the `Active -> Completed` transition once an auction has expired.
#[async_trait]
pub trait CompletionPolicy: Debug + Send + Sync + 'static {
    async fn complete(
        &self,
        repo: &Repository,
        auction_id: &AuctionId,
        cancellation_token: &CancellationToken,
    ) -> MonitorOutcome;
}

pub fn completion_policy_from_options(options: &CompletionOptions) -> Arc<dyn CompletionPolicy> {
    if options.retries == 0 {
        Arc::new(SingleAttempt)
    } else {
        Arc::new(BoundedRetry {
            max_retries: options.retries,
            backoff:     options.backoff,
        })
    }
}

async fn attempt_completion(
    repo: &Repository,
    auction_id: &AuctionId,
) -> Result<MonitorOutcome, StoreError> {
    tracing::info!("Marking auction as completed");
    if repo.complete_auction(auction_id).await? {
        Ok(MonitorOutcome::Completed)
    } else {
        tracing::info!("Auction already completed");
        Ok(MonitorOutcome::AlreadyCompleted)
    }
}

/// One conditional update and no retry. A failed update leaves the auction active.
#[derive(Debug, Default)]
pub struct SingleAttempt;

#[async_trait]
impl CompletionPolicy for SingleAttempt {
    async fn complete(
        &self,
        repo: &Repository,
        auction_id: &AuctionId,
        _cancellation_token: &CancellationToken,
    ) -> MonitorOutcome {
        attempt_completion(repo, auction_id)
            .await
            .unwrap_or_else(|err| {
                tracing::error!(error = %err, "Failed to update auction status");
                MonitorOutcome::Failed
            })
    }
}

/// Retries a failed update up to `max_retries` times, waiting `backoff` between attempts.
#[derive(Debug)]
pub struct BoundedRetry {
    pub max_retries: u32,
    pub backoff:     Duration,
}

#[async_trait]
impl CompletionPolicy for BoundedRetry {
    async fn complete(
        &self,
        repo: &Repository,
        auction_id: &AuctionId,
        cancellation_token: &CancellationToken,
    ) -> MonitorOutcome {
        let mut attempt = 0;
        loop {
            match attempt_completion(repo, auction_id).await {
                Ok(outcome) => return outcome,
                Err(err) if attempt >= self.max_retries => {
                    tracing::error!(error = %err, attempt, "Failed to update auction status, giving up");
                    return MonitorOutcome::Failed;
                }
                Err(err) => {
                    tracing::warn!(error = %err, attempt, "Failed to update auction status, retrying");
                }
            }
            attempt += 1;
            tokio::select! {
                biased;
                _ = cancellation_token.cancelled() => return MonitorOutcome::Cancelled,
                _ = tokio::time::sleep(self.backoff) => {}
            }
        }
    }
}
