//! tailview - Entry Point

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tailview::transport::{CallMetadata, StaticMetadata, StdinLogStream, StreamRequest};
use tailview::view::ViewOptions;
use tracing::info;

/// tailview - follow a live log stream piped on stdin
#[derive(Parser, Debug)]
#[command(name = "tailview")]
#[command(version)]
#[command(about = "TUI for following live log streams with auto-scroll and unread tracking")]
pub struct Args {
    /// Label for the stream being followed (shown on the pane border)
    #[arg(default_value = "stdin")]
    pub target: String,

    /// Start scrolled to the top instead of following the newest line
    #[arg(long)]
    pub no_follow: bool,

    /// Path to the tracing log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Precedence chain: Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = tailview::config::load_config_with_precedence(args.config.clone())?;
        let merged = tailview::config::merge_config(config_file);
        let with_env = tailview::config::apply_env_overrides(merged);

        let follow_override = if args.no_follow { Some(false) } else { None };
        tailview::config::apply_cli_overrides(with_env, follow_override, args.log_file.clone())
    };

    tailview::logging::init(&config.log_file_path)?;

    info!(config = ?config, target = %args.target, "configuration loaded and resolved");

    let request = StreamRequest::new(&args.target)?;
    let mut metadata = CallMetadata::new();
    metadata.insert("user-agent", concat!("tailview/", env!("CARGO_PKG_VERSION")));

    let options = ViewOptions {
        title: args.target.clone(),
        poll_interval: Duration::from_millis(config.poll_interval_ms),
        follow: config.follow,
    };

    tailview::view::run_stream(
        StdinLogStream::new(),
        StaticMetadata::new(metadata),
        &request,
        options,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn help_does_not_error() {
        let result = Args::try_parse_from(["tailview", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn version_does_not_error() {
        let result = Args::try_parse_from(["tailview", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn no_args_defaults() {
        let args = Args::parse_from(["tailview"]);
        assert_eq!(args.target, "stdin");
        assert!(!args.no_follow);
        assert_eq!(args.log_file, None);
        assert_eq!(args.config, None);
    }

    #[test]
    fn target_populates_label() {
        let args = Args::parse_from(["tailview", "deploy-42"]);
        assert_eq!(args.target, "deploy-42");
    }

    #[test]
    fn no_follow_flag() {
        let args = Args::parse_from(["tailview", "--no-follow"]);
        assert!(args.no_follow);
    }

    #[test]
    fn log_file_flag() {
        let args = Args::parse_from(["tailview", "--log-file", "/tmp/tv.log"]);
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/tv.log")));
    }

    #[test]
    fn config_flag() {
        let args = Args::parse_from(["tailview", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn follow_flows_through_precedence_chain() {
        use tailview::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            follow: Some(true),
            poll_interval_ms: None,
            log_file_path: None,
        };

        let merged = merge_config(Some(config_file));
        assert!(merged.follow, "config file sets follow");

        let with_cli = apply_cli_overrides(merged, Some(false), None);
        assert!(!with_cli.follow, "--no-follow overrides the config file");
    }
}
