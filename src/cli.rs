use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};

use crate::context::Settings;
use crate::region::DEFAULT_REGION;
use crate::sts::CallOptions;

/// Print the caller identity as seen by the legacy and the modern AWS SDK.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Region every check is pinned to
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,
    /// Give up on the modern SDK call after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
    /// Output format of successful checks
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
    /// Exit with status 1 when any check failed
    #[arg(long)]
    pub strict: bool,
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            region: self.region.clone(),
            call_options: CallOptions {
                timeout: self.timeout.map(Duration::from_secs),
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sts-whoami"]).unwrap();

        assert_eq!(cli.output, OutputFormat::Text);
        assert!(!cli.strict);
        assert_eq!(cli.verbose, 0);
        assert_eq!(
            cli.settings(),
            Settings {
                region: "us-east-2".to_string(),
                call_options: CallOptions::default(),
            }
        );
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "sts-whoami",
            "--region",
            "eu-west-1",
            "--timeout",
            "5",
            "--output",
            "json",
            "--strict",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.strict);
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.settings(),
            Settings {
                region: "eu-west-1".to_string(),
                call_options: CallOptions {
                    timeout: Some(Duration::from_secs(5)),
                },
            }
        );
    }
}
