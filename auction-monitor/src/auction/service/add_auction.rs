use {
    super::Service,
    crate::auction::{
        entities,
        repository::StoreError,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum CreateAuctionError {
    #[error("failed to store auction: {0}")]
    Store(#[from] StoreError),
}

pub struct AddAuctionInput {
    pub auction: entities::Auction,
}

impl Service {
    /// Persists a new active auction and starts monitoring it for expiration.
    ///
    /// The result depends on the insert only. Monitoring runs detached from the caller and
    /// is started after the insert succeeded, never when it failed.
    #[tracing::instrument(skip_all, fields(auction_id))]
    pub async fn add_auction(
        &self,
        input: AddAuctionInput,
    ) -> Result<entities::Auction, CreateAuctionError> {
        let auction = entities::Auction {
            status: entities::AuctionStatus::Active,
            ..input.auction
        };
        tracing::Span::current().record("auction_id", auction.id.as_str());

        self.repo.add_auction(&auction).await?;
        self.start_monitor(auction.id.clone(), auction.creation_time);
        Ok(auction)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::{
            entities::{
                Auction,
                AuctionStatus,
                ProductCondition,
            },
            repository::{
                InMemoryDatabase,
                MockDatabase,
            },
            service::tests::{
                expired_auction,
                test_config,
            },
        },
        std::time::Duration,
    };

    #[tokio::test]
    async fn test_add_auction_completes_expired_auction() {
        let service = Service::new_for_test(InMemoryDatabase::new(), test_config());

        let auction = service
            .add_auction(AddAuctionInput {
                auction: expired_auction(),
            })
            .await
            .unwrap();
        assert_eq!(auction.status, AuctionStatus::Active);

        service.wait_for_monitors(Duration::from_millis(500)).await;
        assert_eq!(
            service.stored_status(&auction.id).await,
            Some(AuctionStatus::Completed)
        );
    }

    #[tokio::test]
    async fn test_add_auction_returns_before_monitor_finishes() {
        let service = Service::new_for_test(InMemoryDatabase::new(), test_config());

        let auction = service
            .add_auction(AddAuctionInput {
                auction: Auction::new("Chair", "Furniture", "Oak chair", ProductCondition::New),
            })
            .await
            .unwrap();

        assert_eq!(service.active_monitors(), 1);
        assert_eq!(
            service.stored_status(&auction.id).await,
            Some(AuctionStatus::Active)
        );

        service.wait_for_monitors(Duration::from_secs(1)).await;
        assert_eq!(
            service.stored_status(&auction.id).await,
            Some(AuctionStatus::Completed)
        );
    }

    #[tokio::test]
    async fn test_insert_failure_does_not_start_monitor() {
        let mut db = MockDatabase::new();
        db.expect_add_auction()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection refused".to_string())));
        db.expect_update_auction_status().never();
        let service = Service::new_for_test(db, test_config());

        let result = service
            .add_auction(AddAuctionInput {
                auction: expired_auction(),
            })
            .await;

        assert!(matches!(
            result,
            Err(CreateAuctionError::Store(StoreError::Unavailable(_)))
        ));
        assert_eq!(service.active_monitors(), 0);
        assert!(service.task_tracker.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_auction_is_rejected() {
        let service = Service::new_for_test(InMemoryDatabase::new(), test_config());
        let auction = expired_auction();

        service
            .add_auction(AddAuctionInput {
                auction: auction.clone(),
            })
            .await
            .unwrap();
        let result = service.add_auction(AddAuctionInput { auction }).await;

        assert!(matches!(
            result,
            Err(CreateAuctionError::Store(StoreError::DuplicateAuction(_)))
        ));
        assert!(service.active_monitors() <= 1);
    }

    #[tokio::test]
    async fn test_add_auction_forces_active_status() {
        let service = Service::new_for_test(InMemoryDatabase::new(), test_config());
        let mut auction = expired_auction();
        auction.status = AuctionStatus::Completed;

        let auction = service
            .add_auction(AddAuctionInput { auction })
            .await
            .unwrap();

        assert_eq!(auction.status, AuctionStatus::Active);
        service.wait_for_monitors(Duration::from_millis(500)).await;
        assert_eq!(
            service.stored_status(&auction.id).await,
            Some(AuctionStatus::Completed)
        );
    }
}
