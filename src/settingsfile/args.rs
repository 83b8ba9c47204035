use clap::{Parser, Subcommand};
use std::path::PathBuf;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "settingsfile")]
#[command(version = VERSION)]
#[command(about = "Read and write a settings file through exclusive sessions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding settingsfile.json
    #[arg(long, global = true, env = "SETTINGSFILE_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the file byte by byte
    Cat {
        file: PathBuf,
    },

    /// Print the file line by line, numbered
    #[command(alias = "l")]
    Lines {
        file: PathBuf,
    },

    /// Replace the file content
    #[command(alias = "w")]
    Write {
        file: PathBuf,

        /// Content to write (reads stdin if omitted)
        text: Option<String>,
    },

    /// Add content at the end of the file
    #[command(alias = "a")]
    Append {
        file: PathBuf,

        /// Content to append (reads stdin if omitted)
        text: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (flush, fsync)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_write_with_text() {
        let cli = Cli::parse_from(["settingsfile", "w", "app.conf", "a=1"]);
        match cli.command {
            Commands::Write { file, text } => {
                assert_eq!(file, PathBuf::from("app.conf"));
                assert_eq!(text.as_deref(), Some("a=1"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["settingsfile", "cat", "x", "-v", "--config-dir", "/tmp/c"]);
        assert!(cli.verbose);
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/c")));
    }
}
