use {
    super::{
        Repository,
        StoreError,
    },
    crate::auction::entities,
};

impl Repository {
    pub async fn get_auctions(
        &self,
        status: Option<entities::AuctionStatus>,
    ) -> Result<Vec<entities::Auction>, StoreError> {
        self.db.get_auctions(status).await
    }
}
