use clap::Parser;

use reprochart::app;
use reprochart::cli::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let invocation = cli.resolve()?;

    let stdout = std::io::stdout();
    app::run(&invocation, &mut stdout.lock())
}
