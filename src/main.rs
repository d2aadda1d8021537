//! happygrep - Entry Point

use clap::Parser;
use happygrep::editor::EditorCommand;
use happygrep::session::Session;
use happygrep::source::search_command;
use happygrep::view::{ColorConfig, GrepFormat, RowStyles};
use std::path::PathBuf;
use tracing::info;

/// happygrep - browse recursive grep results and jump into an editor
#[derive(Parser, Debug)]
#[command(name = "happygrep")]
#[command(version)]
#[command(about = "Interactive terminal browser for recursive grep results")]
pub struct Args {
    /// Pattern passed to grep (case-insensitive)
    pub pattern: String,

    /// Directory or file name to prune from the search
    #[arg(short, long, value_name = "PATH")]
    pub ignore: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Editor command template with {line} and {file} placeholders
    #[arg(long)]
    pub editor: Option<String>,

    /// Tab stop used when expanding result content (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub tab_size: Option<u16>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = happygrep::config::load_config_with_precedence(args.config.clone())?;
        let merged = happygrep::config::merge_config(config_file);
        let with_env = happygrep::config::apply_env_overrides(merged);
        happygrep::config::apply_cli_overrides(
            with_env,
            args.editor.clone(),
            args.tab_size.map(usize::from),
        )
    };
    config.validate()?;

    happygrep::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let styles = RowStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));
    let format = GrepFormat::new(
        config.name_width,
        config.number_width,
        config.tab_size,
        styles,
    );

    // A producer that cannot start is fatal before the terminal is touched.
    let command = search_command(&args.pattern, args.ignore.as_deref());
    let session = Session::start(&command, format, happygrep::view::initial_viewport())?;

    happygrep::view::run_with_session(session, command, EditorCommand::new(config.editor))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["happygrep", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["happygrep", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_pattern_is_required() {
        let result = Args::try_parse_from(["happygrep"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_pattern_only_defaults() {
        let args = Args::parse_from(["happygrep", "needle"]);
        assert_eq!(args.pattern, "needle");
        assert_eq!(args.ignore, None);
        assert_eq!(args.config, None);
        assert_eq!(args.editor, None);
        assert_eq!(args.tab_size, None);
        assert!(!args.no_color);
    }

    #[test]
    fn test_ignore_short_flag() {
        let args = Args::parse_from(["happygrep", "-i", "target", "needle"]);
        assert_eq!(args.ignore.as_deref(), Some("target"));
        assert_eq!(args.pattern, "needle");
    }

    #[test]
    fn test_ignore_long_flag() {
        let args = Args::parse_from(["happygrep", "needle", "--ignore", "build"]);
        assert_eq!(args.ignore.as_deref(), Some("build"));
    }

    #[test]
    fn test_pattern_with_leading_dash_after_separator() {
        let args = Args::parse_from(["happygrep", "--", "-v"]);
        assert_eq!(args.pattern, "-v");
    }

    #[test]
    fn test_editor_flag() {
        let args = Args::parse_from(["happygrep", "--editor", "nano +{line} {file}", "x"]);
        assert_eq!(args.editor.as_deref(), Some("nano +{line} {file}"));
    }

    #[test]
    fn test_tab_size_flag() {
        let args = Args::parse_from(["happygrep", "--tab-size", "4", "x"]);
        assert_eq!(args.tab_size, Some(4));
    }

    #[test]
    fn test_tab_size_rejects_zero() {
        let result = Args::try_parse_from(["happygrep", "--tab-size", "0", "x"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_no_color_flag() {
        let args = Args::parse_from(["happygrep", "--no-color", "x"]);
        assert!(args.no_color);
    }

    #[test]
    fn test_config_flag() {
        let args = Args::parse_from(["happygrep", "--config", "/tmp/hg.toml", "x"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/hg.toml")));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let result = Args::try_parse_from(["happygrep", "--follow", "x"]);
        assert!(result.is_err());
    }
}
