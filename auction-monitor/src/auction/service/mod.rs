use {
    super::{
        entities::AuctionId,
        repository::{
            Database,
            Repository,
        },
    },
    crate::config::MonitorConfig,
    self::completion_policy::CompletionPolicy,
    dashmap::DashMap,
    std::sync::Arc,
    tokio_util::{
        sync::CancellationToken,
        task::TaskTracker,
    },
};

pub mod add_auction;
pub mod completion_policy;
pub mod monitor_auction;
pub mod resume_monitoring;
pub mod shutdown;

pub struct ServiceInner {
    repo:               Arc<Repository>,
    config:             MonitorConfig,
    completion_policy:  Arc<dyn CompletionPolicy>,
    task_tracker:       TaskTracker,
    cancellation_token: CancellationToken,
    /// Live monitors, one per auction. Entries are removed when their monitor terminates.
    monitors:           DashMap<AuctionId, CancellationToken>,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(
        db: impl Database,
        config: MonitorConfig,
        completion_policy: Arc<dyn CompletionPolicy>,
        task_tracker: TaskTracker,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self(Arc::new(ServiceInner {
            repo: Arc::new(Repository::new(db)),
            config,
            completion_policy,
            task_tracker,
            cancellation_token,
            monitors: DashMap::new(),
        }))
    }

    pub fn active_monitors(&self) -> usize {
        self.monitors.len()
    }
}

#[cfg(test)]
pub mod tests {
    use {
        super::{
            completion_policy::SingleAttempt,
            *,
        },
        crate::auction::{
            entities::{
                Auction,
                AuctionStatus,
                ProductCondition,
            },
            repository::StoreError,
        },
        std::time::Duration,
        time::OffsetDateTime,
    };

    pub fn test_config() -> MonitorConfig {
        MonitorConfig {
            check_interval:       Duration::from_millis(10),
            expiration_threshold: Duration::from_millis(20),
        }
    }

    pub fn expired_auction() -> Auction {
        let mut auction = Auction::new("Bicycle", "Sports", "Road bike", ProductCondition::Used);
        auction.creation_time = OffsetDateTime::now_utc() - Duration::from_secs(60);
        auction
    }

    impl Service {
        pub fn new_for_test(db: impl Database, config: MonitorConfig) -> Self {
            Service::new(
                db,
                config,
                Arc::new(SingleAttempt),
                TaskTracker::new(),
                CancellationToken::new(),
            )
        }

        pub async fn stored_status(&self, auction_id: &AuctionId) -> Option<AuctionStatus> {
            self.repo
                .get_auctions(None)
                .await
                .unwrap()
                .into_iter()
                .find(|auction| &auction.id == auction_id)
                .map(|auction| auction.status)
        }

        pub async fn wait_for_monitors(&self, timeout: Duration) {
            tokio::time::timeout(timeout, async {
                while self.active_monitors() > 0 {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            })
            .await
            .expect("monitors did not terminate in time");
        }
    }

    #[test]
    fn test_store_error_messages() {
        assert_eq!(
            StoreError::DuplicateAuction("a-1".to_string()).to_string(),
            "auction a-1 already exists"
        );
        assert_eq!(
            StoreError::Unavailable("connection reset".to_string()).to_string(),
            "store unavailable: connection reset"
        );
    }
}
