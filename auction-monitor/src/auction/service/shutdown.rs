use {
    super::Service,
    crate::auction::entities::AuctionId,
};

impl Service {
    /// Stops the monitor of a single auction. Returns false if the auction is not monitored.
    pub fn cancel_monitor(&self, auction_id: &AuctionId) -> bool {
        match self.monitors.get(auction_id) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancels every monitor and waits until all of them have terminated.
    pub async fn shutdown(&self) {
        tracing::info!(
            monitors = self.active_monitors(),
            "Shutting down auction monitors..."
        );
        self.cancellation_token.cancel();
        self.task_tracker.close();
        self.task_tracker.wait().await;
        tracing::info!("Auction monitors stopped");
    }
}
