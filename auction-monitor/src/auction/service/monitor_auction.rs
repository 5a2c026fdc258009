use {
    super::{
        completion_policy::CompletionPolicy,
        Service,
    },
    crate::{
        auction::{
            entities::{
                self,
                AuctionId,
            },
            repository::Repository,
        },
        config::MonitorConfig,
    },
    std::sync::Arc,
    time::OffsetDateTime,
    tokio_util::sync::CancellationToken,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// This monitor moved the auction to `Completed`.
    Completed,
    /// The auction was no longer active when the update ran.
    AlreadyCompleted,
    /// The store update failed. The auction stays active.
    Failed,
    Cancelled,
}

enum MonitorState {
    Monitoring,
    Completing,
    Terminated(MonitorOutcome),
}

/// Background watcher of a single auction.
///
/// Holds only the auction id and creation time. The status is never read back: completion
/// is a conditional update against the store, so any number of monitors (or other writers)
/// can race on the same auction.
pub struct AuctionMonitor {
    auction_id:         AuctionId,
    creation_time:      OffsetDateTime,
    config:             MonitorConfig,
    repo:               Arc<Repository>,
    completion_policy:  Arc<dyn CompletionPolicy>,
    cancellation_token: CancellationToken,
}

impl AuctionMonitor {
    pub fn new(
        auction_id: AuctionId,
        creation_time: OffsetDateTime,
        config: MonitorConfig,
        repo: Arc<Repository>,
        completion_policy: Arc<dyn CompletionPolicy>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            auction_id,
            creation_time,
            config,
            repo,
            completion_policy,
            cancellation_token,
        }
    }

    #[tracing::instrument(skip_all, name = "monitor_auction", fields(auction_id = %self.auction_id))]
    pub async fn run(self) -> MonitorOutcome {
        let mut state = MonitorState::Monitoring;
        loop {
            state = match state {
                MonitorState::Monitoring => self.check_expiration().await,
                MonitorState::Completing => MonitorState::Terminated(
                    self.completion_policy
                        .complete(&self.repo, &self.auction_id, &self.cancellation_token)
                        .await,
                ),
                MonitorState::Terminated(outcome) => return outcome,
            }
        }
    }

    async fn check_expiration(&self) -> MonitorState {
        tracing::info!("Monitoring auction");
        if entities::has_expired(
            self.creation_time,
            OffsetDateTime::now_utc(),
            self.config.expiration_threshold,
        ) {
            return MonitorState::Completing;
        }

        tokio::select! {
            biased;
            _ = self.cancellation_token.cancelled() => {
                tracing::info!("Auction monitor cancelled");
                MonitorState::Terminated(MonitorOutcome::Cancelled)
            }
            _ = tokio::time::sleep(self.config.check_interval) => MonitorState::Monitoring,
        }
    }
}

impl Service {
    /// Spawns a detached monitor for the auction. Returns false if one is already running.
    pub(super) fn start_monitor(&self, auction_id: AuctionId, creation_time: OffsetDateTime) -> bool {
        let cancellation_token = match self.monitors.entry(auction_id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                tracing::warn!(auction_id, "Auction is already monitored");
                return false;
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(self.cancellation_token.child_token()).clone()
            }
        };

        let monitor = AuctionMonitor::new(
            auction_id.clone(),
            creation_time,
            self.config,
            self.repo.clone(),
            self.completion_policy.clone(),
            cancellation_token,
        );
        self.task_tracker.spawn({
            let service = self.clone();
            async move {
                let outcome = monitor.run().await;
                tracing::debug!(auction_id, outcome = ?outcome, "Auction monitor terminated");
                service.monitors.remove(&auction_id);
            }
        });
        true
    }
}
