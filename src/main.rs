use anyhow::Result;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use console_bank::{AccountSession, BankConfig, Console};

fn main() -> Result<()> {
    let config = BankConfig::default();

    // Logs go to stderr so the menu dialogue on stdout stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::info!(version = console_bank::VERSION, "starting console bank");

    let mut session = AccountSession::new();
    let stdin = io::stdin();
    let stdout = io::stdout();

    // Streams are released when the console drops at the end of main
    let mut console = Console::with_config(stdin.lock(), stdout.lock(), config);
    console.run(&mut session)?;

    tracing::info!(accounts_opened = session.registry().count(), "session ended");
    Ok(())
}
