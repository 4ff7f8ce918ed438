use hours::commands::Cli;
use hours::libs::messages::macros::is_debug_mode;
use hours::msg_error;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hours=debug")))
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = Cli::menu().await {
        msg_error!(e);
        process::exit(1);
    }
}
