use clap::Parser;
use gridkit::cli::{self, Cli};
use gridkit::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json)?;
    tracing::debug!("gridkit {} (built {})", gridkit::VERSION, gridkit::BUILD_DATE);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli::run(cli, &mut out).await
}
