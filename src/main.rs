use anyhow::anyhow;
use clap::Parser;
use tracing::Level;

use sts_whoami::cli::Cli;
use sts_whoami::commands::check::CheckCommand;
use sts_whoami::context::Context;
use sts_whoami::types::Check;

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let context = Context::new(cli.settings());
    let mut stdout = std::io::stdout();
    let report = CheckCommand::run(&context, &Check::ALL, cli.output, &mut stdout).await?;

    let code = report.exit_code(cli.strict);
    if code != 0 {
        eprintln!(
            "{} of {} identity checks failed",
            report.failed(),
            report.outcomes().len()
        );
        std::process::exit(code);
    }

    Ok(())
}
