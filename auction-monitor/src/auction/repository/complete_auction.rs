use {
    super::{
        Repository,
        StoreError,
    },
    crate::auction::entities::{
        AuctionId,
        AuctionStatus,
    },
};

impl Repository {
    /// Moves the auction from `Active` to `Completed`.
    /// Returns true if this call performed the transition, false if the auction was
    /// not active anymore (or does not exist).
    #[tracing::instrument(skip_all, name = "complete_auction_repo", fields(auction_id))]
    pub async fn complete_auction(&self, auction_id: &AuctionId) -> Result<bool, StoreError> {
        tracing::Span::current().record("auction_id", auction_id.as_str());
        let matched = self
            .db
            .update_auction_status(auction_id, AuctionStatus::Active, AuctionStatus::Completed)
            .await?;
        Ok(matched > 0)
    }
}
