//! Command-line argument parsing for the tilda CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use std::path::PathBuf;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Analyze a video file
    Video { path: PathBuf },
    /// Analyze a still image
    Image { path: PathBuf },
    /// Upload a file without analyzing it
    Upload { path: PathBuf },
    /// Show the backend's GPU/CPU capability report
    SystemInfo,
    /// Check backend health
    Health,
    /// Show version information
    Version,
    /// Show usage
    Help,
}

/// Options shared by commands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliOptions {
    /// Backend base URL override (`--url`).
    pub url: Option<String>,
    /// Output directory for saved results (`--out`).
    pub out: Option<PathBuf>,
}

/// Parse command-line arguments into a command and its options.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use tilda::cli::{parse_args, CliCommand};
///
/// let args = vec!["tilda".to_string(), "--version".to_string()];
/// let (command, _) = parse_args(args.into_iter()).unwrap();
/// assert_eq!(command, CliCommand::Version);
/// ```
pub fn parse_args<I>(mut args: I) -> Result<(CliCommand, CliOptions), String>
where
    I: Iterator<Item = String>,
{
    let _ = args.next(); // Skip the program name

    let mut options = CliOptions::default();
    let mut positionals: Vec<String> = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok((CliCommand::Version, options)),
            "--help" | "-h" => return Ok((CliCommand::Help, options)),
            "--url" => {
                let value = args.next().ok_or_else(|| "--url requires a value".to_string())?;
                options.url = Some(value);
            }
            "--out" => {
                let value = args.next().ok_or_else(|| "--out requires a value".to_string())?;
                options.out = Some(PathBuf::from(value));
            }
            other if other.starts_with('-') => return Err(format!("unknown flag: {other}")),
            other => positionals.push(other.to_string()),
        }
    }

    let mut positionals = positionals.into_iter();
    let command = match positionals.next().as_deref() {
        None => CliCommand::Help,
        Some("video") => CliCommand::Video {
            path: PathBuf::from(
                positionals
                    .next()
                    .ok_or_else(|| "video requires a file path".to_string())?,
            ),
        },
        Some("image") => CliCommand::Image {
            path: PathBuf::from(
                positionals
                    .next()
                    .ok_or_else(|| "image requires a file path".to_string())?,
            ),
        },
        Some("upload") => CliCommand::Upload {
            path: PathBuf::from(
                positionals
                    .next()
                    .ok_or_else(|| "upload requires a file path".to_string())?,
            ),
        },
        Some("system-info") => CliCommand::SystemInfo,
        Some("health") => CliCommand::Health,
        Some("version") => CliCommand::Version,
        Some("help") => CliCommand::Help,
        Some(other) => return Err(format!("unknown command: {other}")),
    };

    Ok((command, options))
}
