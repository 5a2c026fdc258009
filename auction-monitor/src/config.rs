use clap::{
    crate_authors,
    crate_description,
    crate_name,
    crate_version,
    Args,
    Parser,
};

mod monitor;
mod server;

pub use monitor::{
    CompletionOptions,
    MonitorConfig,
    MonitorOptions,
};

// `Options` is a struct definition to provide clean command-line args for the auction monitor.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
#[allow(clippy::large_enum_variant)]
pub enum Options {
    /// Run the auction expiration monitor service.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub monitor: MonitorOptions,

    #[command(flatten)]
    pub completion: CompletionOptions,
}
