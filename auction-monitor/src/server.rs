use {
    crate::{
        auction::{
            repository::InMemoryDatabase,
            service::{
                completion_policy::completion_policy_from_options,
                Service,
            },
        },
        config::{
            MonitorConfig,
            RunOptions,
        },
        kernel::db,
    },
    tokio_util::{
        sync::CancellationToken,
        task::TaskTracker,
    },
};

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    let config = MonitorConfig::from(&run_options.monitor);
    tracing::info!(
        check_interval = ?config.check_interval,
        expiration_threshold = ?config.expiration_threshold,
        "Using auction monitor config"
    );

    let completion_policy = completion_policy_from_options(&run_options.completion);
    let task_tracker = TaskTracker::new();
    let cancellation_token = CancellationToken::new();

    let service = match run_options.server.database_url {
        Some(database_url) => Service::new(
            db::connect(&database_url).await?,
            config,
            completion_policy,
            task_tracker,
            cancellation_token,
        ),
        None => {
            tracing::warn!("No database url provided, auctions are kept in memory");
            Service::new(
                InMemoryDatabase::new(),
                config,
                completion_policy,
                task_tracker,
                cancellation_token,
            )
        }
    };

    service.resume_monitoring().await?;

    tracing::info!("Registered shutdown signal handler...");
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shut down signal received, waiting for tasks...");
    service.shutdown().await;
    Ok(())
}
