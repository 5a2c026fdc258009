use {
    super::entities,
    std::sync::Arc,
};

mod add_auction;
mod complete_auction;
mod get_auctions;
mod in_memory;
mod models;

pub use {
    in_memory::InMemoryDatabase,
    models::*,
};

#[derive(Debug)]
pub struct Repository {
    pub db: Arc<dyn Database>,
}

impl Repository {
    pub fn new(db: impl Database) -> Self {
        Self { db: Arc::new(db) }
    }
}
