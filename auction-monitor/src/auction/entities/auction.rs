use {
    std::time::Duration,
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type AuctionId = String;

/// Lifecycle of an auction. The only legal transition is `Active -> Completed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuctionStatus {
    Active,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Auction {
    pub id:            AuctionId,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    pub creation_time: OffsetDateTime,
}

impl Auction {
    pub fn new(
        product_name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        condition: ProductCondition,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_name: product_name.into(),
            category: category.into(),
            description: description.into(),
            condition,
            status: AuctionStatus::Active,
            creation_time: OffsetDateTime::now_utc(),
        }
    }
}

/// Returns true once `now - creation_time >= threshold`.
/// A creation time in the future never counts as expired.
pub fn has_expired(creation_time: OffsetDateTime, now: OffsetDateTime, threshold: Duration) -> bool {
    match Duration::try_from(now - creation_time) {
        Ok(elapsed) => elapsed >= threshold,
        Err(_) => false,
    }
}
