use {
    clap::Args,
    std::time::Duration,
};

pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_EXPIRATION_THRESHOLD: Duration = Duration::from_secs(3 * 60);
const DEFAULT_COMPLETION_BACKOFF: &str = "1s";

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Monitor Options")]
#[group(id = "Monitor")]
pub struct MonitorOptions {
    /// How often each auction is checked for expiration, e.g. `10s` or `1m`.
    /// Falls back to 1 minute when missing or invalid.
    #[arg(long = "auction-interval")]
    #[arg(env = "AUCTION_INTERVAL")]
    pub check_interval: Option<String>,

    /// How long an auction stays active before it is completed, e.g. `3m`.
    /// Falls back to 3 minutes when missing or invalid.
    #[arg(long = "auction-expire")]
    #[arg(env = "AUCTION_EXPIRE")]
    pub expiration_threshold: Option<String>,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Completion Options")]
#[group(id = "Completion")]
pub struct CompletionOptions {
    /// Extra attempts to complete an expired auction after a failed store update.
    /// Zero keeps the single attempt behaviour.
    #[arg(long = "completion-retries")]
    #[arg(env = "AUCTION_COMPLETION_RETRIES")]
    #[arg(default_value = "0")]
    pub retries: u32,

    /// Delay between completion attempts.
    #[arg(long = "completion-backoff")]
    #[arg(env = "AUCTION_COMPLETION_BACKOFF")]
    #[arg(default_value = DEFAULT_COMPLETION_BACKOFF)]
    #[arg(value_parser = humantime::parse_duration)]
    pub backoff: Duration,
}

#[derive(Debug, thiserror::Error)]
enum InvalidDuration {
    #[error(transparent)]
    Parse(#[from] humantime::DurationError),
    #[error("duration must be greater than zero")]
    Zero,
}

/// Timing of every auction monitor. Built once at start-up and copied into each monitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonitorConfig {
    pub check_interval:       Duration,
    pub expiration_threshold: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval:       DEFAULT_CHECK_INTERVAL,
            expiration_threshold: DEFAULT_EXPIRATION_THRESHOLD,
        }
    }
}

impl MonitorConfig {
    /// Never fails: absent or malformed values are replaced by the defaults.
    pub fn from_raw(check_interval: Option<&str>, expiration_threshold: Option<&str>) -> Self {
        Self {
            check_interval:       parse_or_default(
                "check_interval",
                check_interval,
                DEFAULT_CHECK_INTERVAL,
                false,
            ),
            expiration_threshold: parse_or_default(
                "expiration_threshold",
                expiration_threshold,
                DEFAULT_EXPIRATION_THRESHOLD,
                true,
            ),
        }
    }
}

impl From<&MonitorOptions> for MonitorConfig {
    fn from(options: &MonitorOptions) -> Self {
        Self::from_raw(
            options.check_interval.as_deref(),
            options.expiration_threshold.as_deref(),
        )
    }
}

fn parse_duration(value: &str, allow_zero: bool) -> Result<Duration, InvalidDuration> {
    let duration = humantime::parse_duration(value.trim())?;
    if duration.is_zero() && !allow_zero {
        return Err(InvalidDuration::Zero);
    }
    Ok(duration)
}

fn parse_or_default(
    name: &'static str,
    value: Option<&str>,
    default: Duration,
    allow_zero: bool,
) -> Duration {
    match value {
        None => default,
        Some(value) => parse_duration(value, allow_zero).unwrap_or_else(|err| {
            tracing::warn!(
                option = name,
                value,
                error = %err,
                default = ?default,
                "Invalid duration, using default"
            );
            default
        }),
    }
}
