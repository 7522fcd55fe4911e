use std::process::ExitCode;

use anyhow::Result;
use gearset_codec::cli;
use gearset_codec::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let config = Config::from_args_and_env()?;
    cli::init_logging(&config);
    cli::run(config).await
}
