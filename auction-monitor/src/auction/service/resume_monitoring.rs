use {
    super::Service,
    crate::auction::{
        entities::AuctionStatus,
        repository::StoreError,
    },
};

impl Service {
    /// Starts a monitor for every auction that is still active in the store,
    /// e.g. after a restart. Returns how many monitors were started.
    pub async fn resume_monitoring(&self) -> Result<usize, StoreError> {
        let auctions = self.repo.get_auctions(Some(AuctionStatus::Active)).await?;
        let started = auctions
            .into_iter()
            .filter(|auction| self.start_monitor(auction.id.clone(), auction.creation_time))
            .count();
        tracing::info!(count = started, "Resumed monitoring of active auctions");
        Ok(started)
    }
}
