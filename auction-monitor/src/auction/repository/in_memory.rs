use {
    super::{
        entities,
        Database,
        StoreError,
    },
    async_trait::async_trait,
    std::collections::HashMap,
    tokio::sync::RwLock,
};

/// Process-local store with the same compare-and-set semantics as the Postgres table.
/// Used when no database url is configured, and by tests.
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    auctions: RwLock<HashMap<entities::AuctionId, entities::Auction>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), StoreError> {
        let mut auctions = self.auctions.write().await;
        if auctions.contains_key(&auction.id) {
            return Err(StoreError::DuplicateAuction(auction.id.clone()));
        }
        auctions.insert(auction.id.clone(), auction.clone());
        Ok(())
    }

    async fn update_auction_status(
        &self,
        auction_id: &entities::AuctionId,
        expected_status: entities::AuctionStatus,
        new_status: entities::AuctionStatus,
    ) -> Result<u64, StoreError> {
        let mut auctions = self.auctions.write().await;
        match auctions.get_mut(auction_id) {
            Some(auction) if auction.status == expected_status => {
                auction.status = new_status;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn get_auctions(
        &self,
        status: Option<entities::AuctionStatus>,
    ) -> Result<Vec<entities::Auction>, StoreError> {
        let mut auctions: Vec<entities::Auction> = self
            .auctions
            .read()
            .await
            .values()
            .filter(|auction| status.map_or(true, |status| auction.status == status))
            .cloned()
            .collect();
        auctions.sort_by_key(|auction| auction.creation_time);
        Ok(auctions)
    }
}
