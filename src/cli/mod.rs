//! CLI surface: argument parsing and command execution.

mod args;

pub use args::{parse_args, CliCommand, CliOptions};

use std::path::Path;

use crate::client::AnalysisClient;
use crate::config::Config;
use crate::error::Result;
use crate::models::AnalysisResult;
use crate::output;

/// Usage text printed by `help` and on argument errors.
pub const USAGE: &str = "\
tilda - client for the tilda dashcam-footage analysis backend

USAGE:
    tilda [OPTIONS] <COMMAND>

COMMANDS:
    video <FILE>    Analyze a dashcam video
    image <FILE>    Analyze a still image
    upload <FILE>   Upload a file without analyzing it
    system-info     Show the backend's GPU/CPU capabilities
    health          Check that the backend is reachable
    version         Show version information
    help            Show this message

OPTIONS:
    --url <URL>     Backend base URL (overrides TILDA_BACKEND_URL and config)
    --out <DIR>     Directory to save analysis artifacts into";

/// Execute a parsed command.
pub async fn run(command: CliCommand, options: CliOptions) -> Result<()> {
    let config = Config::load();
    let base_url = config.resolve_backend_url(options.url.as_deref());
    let client = AnalysisClient::with_base_url(base_url);

    match command {
        CliCommand::Video { path } => {
            let result = client
                .analyze_video(&path, &config.settings, print_progress)
                .await?;
            report(&result, options.out.as_deref())
        }
        CliCommand::Image { path } => {
            let result = client
                .analyze_image(&path, &config.settings, print_progress)
                .await?;
            report(&result, options.out.as_deref())
        }
        CliCommand::Upload { path } => {
            let response = client.upload(&path).await?;
            println!("uploaded {} to {}", response.filename, response.path);
            Ok(())
        }
        CliCommand::SystemInfo => {
            let info = client.system_info().await?;
            println!("device:  {}", info.device);
            println!("cuda:    {}", info.cuda_available);
            if let Some(gpu) = &info.gpu_name {
                println!("gpu:     {gpu}");
            }
            println!("torch:   {}", info.torch_version);
            Ok(())
        }
        CliCommand::Health => {
            let healthy = client.health_check().await?;
            println!("{}", if healthy { "ok" } else { "unhealthy" });
            Ok(())
        }
        CliCommand::Version => {
            println!("tilda {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliCommand::Help => {
            println!("{USAGE}");
            Ok(())
        }
    }
}

/// Progress lines go to stderr so stdout stays parseable.
fn print_progress(progress: f64, step: &str) {
    eprintln!("[{progress:>3.0}%] {step}");
}

fn report(result: &AnalysisResult, out: Option<&Path>) -> Result<()> {
    if let Some(error) = &result.error {
        eprintln!("backend reported an error: {error}");
    }
    if !result.summary.is_empty() {
        println!("{}", result.summary);
    }
    if let Some(statistics) = &result.statistics {
        println!("{statistics}");
    }

    let dir = out
        .map(Path::to_path_buf)
        .unwrap_or_else(output::default_output_dir);
    let saved = output::save_result(result, &dir)?;
    println!(
        "saved {} frame(s){} to {}",
        saved.frames,
        if saved.annotated {
            " and annotated image"
        } else {
            ""
        },
        saved.directory.display()
    );
    Ok(())
}
