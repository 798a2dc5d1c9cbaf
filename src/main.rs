use color_eyre::Result;
use tilda::cli::{self, parse_args};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match parse_args(std::env::args()) {
        Ok((command, options)) => cli::run(command, options).await.map_err(Into::into),
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("{}", cli::USAGE);
            std::process::exit(2);
        }
    }
}
