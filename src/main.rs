use clap::Parser;
use debit_status_poller::application::poller::TransactionPoller;
use debit_status_poller::domain::messages::user_message;
use debit_status_poller::domain::ports::StatusSourceBox;
use debit_status_poller::domain::transaction::TransactionHandle;
use debit_status_poller::infrastructure::http::HttpStatusSource;
use debit_status_poller::infrastructure::in_memory::ScriptedStatusSource;
use debit_status_poller::interfaces::cli::Cli;
use debit_status_poller::interfaces::outcome_writer::{OutcomeWriter, exit_code};
use debit_status_poller::logging;
use miette::{IntoDiagnostic, Result};
use std::io;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    let config = cli.resolve_config().into_diagnostic()?;
    let handle = TransactionHandle::new(&cli.transaction_id, &cli.booking_id).into_diagnostic()?;

    let source: StatusSourceBox = if let Some(script) = &cli.simulate {
        info!("replaying simulated status script");
        Box::new(ScriptedStatusSource::parse_script(script).into_diagnostic()?)
    } else {
        Box::new(
            HttpStatusSource::new(&config.api_base_url, config.request_timeout())
                .into_diagnostic()?,
        )
    };

    let poller = TransactionPoller::new(source, config.policy());

    // Ctrl-C stops polling without producing an outcome.
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let mut report_status = |status: &str| info!(status, "transaction status");
    let outcome = poller
        .poll_until_terminal(&handle, Some(&mut report_status), &cancel)
        .await
        .into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock());
    writer.write_outcome(&outcome).into_diagnostic()?;
    eprintln!("{}", user_message(&outcome));

    std::process::exit(exit_code(&outcome));
}
