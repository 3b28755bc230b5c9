use modules::menu;
use utils::logger::init_default_logger;

mod config;
mod distribution;
mod executor;
mod export;
mod modules;
mod onchain;
mod recipients;
mod session;
mod utils;
mod xaman_api;

#[cfg(test)]
mod test_utils;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let _guard = init_default_logger();

    if let Err(e) = menu().await {
        tracing::error!("Execution stopped with an unexpected error: {e}");
    }

    Ok(())
}
