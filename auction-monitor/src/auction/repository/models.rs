#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::kernel::db::DB,
    async_trait::async_trait,
    sqlx::FromRow,
    std::fmt::Debug,
    time::{
        PrimitiveDateTime,
        UtcOffset,
    },
    tracing::instrument,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "auction_status", rename_all = "snake_case")]
pub enum AuctionStatus {
    Active,
    Completed,
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::Active => AuctionStatus::Active,
            entities::AuctionStatus::Completed => AuctionStatus::Completed,
        }
    }
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Active => entities::AuctionStatus::Active,
            AuctionStatus::Completed => entities::AuctionStatus::Completed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "product_condition", rename_all = "snake_case")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

impl From<entities::ProductCondition> for ProductCondition {
    fn from(condition: entities::ProductCondition) -> Self {
        match condition {
            entities::ProductCondition::New => ProductCondition::New,
            entities::ProductCondition::Used => ProductCondition::Used,
            entities::ProductCondition::Refurbished => ProductCondition::Refurbished,
        }
    }
}

impl From<ProductCondition> for entities::ProductCondition {
    fn from(condition: ProductCondition) -> Self {
        match condition {
            ProductCondition::New => entities::ProductCondition::New,
            ProductCondition::Used => entities::ProductCondition::Used,
            ProductCondition::Refurbished => entities::ProductCondition::Refurbished,
        }
    }
}

#[derive(Clone, FromRow, Debug)]
pub struct Auction {
    pub id:            String,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    pub creation_time: PrimitiveDateTime,
}

impl From<&entities::Auction> for Auction {
    fn from(auction: &entities::Auction) -> Self {
        let creation_time = auction.creation_time.to_offset(UtcOffset::UTC);
        Self {
            id:            auction.id.clone(),
            product_name:  auction.product_name.clone(),
            category:      auction.category.clone(),
            description:   auction.description.clone(),
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: PrimitiveDateTime::new(creation_time.date(), creation_time.time()),
        }
    }
}

impl From<Auction> for entities::Auction {
    fn from(auction: Auction) -> Self {
        Self {
            id:            auction.id,
            product_name:  auction.product_name,
            category:      auction.category,
            description:   auction.description,
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: auction.creation_time.assume_offset(UtcOffset::UTC),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("auction {0} already exists")]
    DuplicateAuction(entities::AuctionId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Persistence boundary for auctions.
///
/// `update_auction_status` is a compare-and-set: the status changes only when the
/// stored status still equals `expected_status`, and the number of matched records
/// (0 or 1) is returned. Completion relies on it for at-most-once transitions.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), StoreError>;
    async fn update_auction_status(
        &self,
        auction_id: &entities::AuctionId,
        expected_status: entities::AuctionStatus,
        new_status: entities::AuctionStatus,
    ) -> Result<u64, StoreError>;
    async fn get_auctions(
        &self,
        status: Option<entities::AuctionStatus>,
    ) -> Result<Vec<entities::Auction>, StoreError>;
}

#[async_trait]
impl Database for DB {
    #[instrument(
        target = "metrics",
        name = "db_add_auction",
        fields(category = "db_queries", result = "success", name = "add_auction"),
        skip_all
    )]
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), StoreError> {
        let model = Auction::from(auction);
        sqlx::query(
            "INSERT INTO auction (id, product_name, category, description, condition, status, creation_time) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&model.id)
        .bind(&model.product_name)
        .bind(&model.category)
        .bind(&model.description)
        .bind(model.condition)
        .bind(model.status)
        .bind(model.creation_time)
        .execute(self)
        .await
        .map_err(|e| {
            tracing::Span::current().record("result", "error");
            let is_duplicate = e
                .as_database_error()
                .is_some_and(|db_error| db_error.is_unique_violation());
            if is_duplicate {
                StoreError::DuplicateAuction(auction.id.clone())
            } else {
                tracing::error!(error = e.to_string(), auction_id = auction.id, "DB: Failed to insert auction");
                StoreError::from(e)
            }
        })?;
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_update_auction_status",
        fields(category = "db_queries", result = "success", name = "update_auction_status"),
        skip_all
    )]
    async fn update_auction_status(
        &self,
        auction_id: &entities::AuctionId,
        expected_status: entities::AuctionStatus,
        new_status: entities::AuctionStatus,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE auction SET status = $1 WHERE id = $2 AND status = $3")
            .bind(AuctionStatus::from(new_status))
            .bind(auction_id)
            .bind(AuctionStatus::from(expected_status))
            .execute(self)
            .await
            .inspect_err(|_| {
                tracing::Span::current().record("result", "error");
            })?;
        Ok(result.rows_affected())
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auctions",
        fields(category = "db_queries", result = "success", name = "get_auctions"),
        skip_all
    )]
    async fn get_auctions(
        &self,
        status: Option<entities::AuctionStatus>,
    ) -> Result<Vec<entities::Auction>, StoreError> {
        let mut query = sqlx::QueryBuilder::new("SELECT * FROM auction");
        if let Some(status) = status {
            query.push(" WHERE status = ");
            query.push_bind(AuctionStatus::from(status));
        }
        query.push(" ORDER BY creation_time ASC");
        let auctions: Vec<Auction> = query
            .build_query_as()
            .fetch_all(self)
            .await
            .inspect_err(|_| {
                tracing::Span::current().record("result", "error");
            })?;
        Ok(auctions.into_iter().map(Into::into).collect())
    }
}
