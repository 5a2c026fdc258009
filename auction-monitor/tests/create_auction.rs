use {
    auction_monitor::{
        auction::{
            entities::{
                Auction,
                AuctionStatus,
                ProductCondition,
            },
            repository::{
                Database,
                InMemoryDatabase,
                StoreError,
            },
            service::{
                add_auction::{
                    AddAuctionInput,
                    CreateAuctionError,
                },
                completion_policy::SingleAttempt,
                Service,
            },
        },
        config::MonitorConfig,
    },
    std::{
        sync::Arc,
        time::Duration,
    },
    time::OffsetDateTime,
    tokio_util::{
        sync::CancellationToken,
        task::TaskTracker,
    },
};

fn service(config: MonitorConfig) -> Service {
    Service::new(
        InMemoryDatabase::new(),
        config,
        Arc::new(SingleAttempt),
        TaskTracker::new(),
        CancellationToken::new(),
    )
}

async fn wait_until_idle(service: &Service) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while service.active_monitors() > 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("monitors did not terminate in time");
}

#[tokio::test]
async fn test_created_auction_is_completed_after_threshold() {
    let service = service(MonitorConfig::from_raw(Some("10ms"), Some("20ms")));
    let mut auction = Auction::new("Radio", "Electronics", "Vintage radio", ProductCondition::Used);
    auction.creation_time = OffsetDateTime::now_utc() - Duration::from_secs(60);

    let created = service
        .add_auction(AddAuctionInput { auction })
        .await
        .unwrap();
    assert_eq!(created.status, AuctionStatus::Active);

    wait_until_idle(&service).await;
    // Nothing active is left in the store to resume.
    assert_eq!(service.resume_monitoring().await.unwrap(), 0);
    service.shutdown().await;
}

#[tokio::test]
async fn test_duplicate_creation_fails_and_monitor_can_be_cancelled() {
    let service = service(MonitorConfig::from_raw(Some("1h"), Some("1h")));
    let auction = Auction::new("Sofa", "Furniture", "Three seater", ProductCondition::New);

    service
        .add_auction(AddAuctionInput {
            auction: auction.clone(),
        })
        .await
        .unwrap();
    let duplicate = service
        .add_auction(AddAuctionInput {
            auction: auction.clone(),
        })
        .await;
    assert!(matches!(
        duplicate,
        Err(CreateAuctionError::Store(StoreError::DuplicateAuction(id))) if id == auction.id
    ));
    assert_eq!(service.active_monitors(), 1);

    assert!(service.cancel_monitor(&auction.id));
    wait_until_idle(&service).await;
    service.shutdown().await;
}

#[tokio::test]
async fn test_in_memory_store_is_usable_directly() {
    let db = InMemoryDatabase::new();
    let auction = Auction::new("Rug", "Home", "Wool rug", ProductCondition::Refurbished);
    db.add_auction(&auction).await.unwrap();

    let matched = db
        .update_auction_status(&auction.id, AuctionStatus::Active, AuctionStatus::Completed)
        .await
        .unwrap();

    assert_eq!(matched, 1);
}
