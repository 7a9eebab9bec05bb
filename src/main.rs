use bloodlink::cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("bloodlink=debug,info")
    } else {
        EnvFilter::new("bloodlink=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Match(args) => {
            cli::find::run(args, &cli.data_dir, cli.format, cli.verbose)?;
        }
        cli::Commands::Donor(args) => {
            cli::donor::run(args, &cli.data_dir, cli.format, cli.verbose)?;
        }
        cli::Commands::Distance(args) => {
            cli::distance::run(args, cli.format)?;
        }
    }

    Ok(())
}
