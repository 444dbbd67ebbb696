//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// ssdtag - Extract unit record sheet metadata and keep annotations in step.
#[derive(Debug, Parser)]
#[command(name = "ssdtag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.ssdtag/config.toml)
    #[arg(short, long, global = true, env = "SSDTAG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log what would be written without writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Plain annotation text
    Plain,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse one document's text and show its metadata
    Parse(ParseArgs),

    /// Merge a document's metadata into an existing annotation
    Merge(MergeArgs),

    /// Read an annotation back and flag composites
    Check(CheckArgs),

    /// Annotate every unannotated document in a directory
    Describe(DirArgs),

    /// Fill in missing fields of annotated documents in a directory
    Refresh(DirArgs),

    /// List documents whose annotation describes several units
    Composites(DirArgs),

    /// Print the effective configuration as TOML
    Config,
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// File holding the document's extracted text
    pub file: PathBuf,

    /// Filename to derive the source book from (default: the file's name)
    #[arg(long)]
    pub filename: Option<String>,
}

/// Arguments for the merge command.
#[derive(Debug, Parser)]
pub struct MergeArgs {
    /// File holding the document's extracted text
    #[arg(short, long)]
    pub text: PathBuf,

    /// File holding the existing annotation
    #[arg(short, long)]
    pub annotation: PathBuf,

    /// Filename to derive the source book from (default: the text file's name)
    #[arg(long)]
    pub filename: Option<String>,

    /// Rewrite the annotation file in place
    #[arg(short, long)]
    pub write: bool,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// File holding the annotation
    pub file: PathBuf,
}

/// Arguments for the directory batch commands.
#[derive(Debug, Parser)]
pub struct DirArgs {
    /// Directory of extracted-text documents with `.annotation` sidecars
    pub dir: PathBuf,

    /// Process at most this many documents
    #[arg(short = 'n', long)]
    pub max_documents: Option<usize>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Plain => crate::config::OutputFormat::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        let cli = Cli::parse_from(["ssdtag", "parse", "ship.txt", "--filename", "ssd_book_1_004.pdf"]);
        match cli.command {
            Command::Parse(args) => {
                assert_eq!(args.file, PathBuf::from("ship.txt"));
                assert_eq!(args.filename.as_deref(), Some("ssd_book_1_004.pdf"));
            }
            _ => panic!("Expected Parse command"),
        }
    }

    #[test]
    fn test_merge_command() {
        let cli = Cli::parse_from([
            "ssdtag",
            "merge",
            "--text",
            "ship.txt",
            "--annotation",
            "ship.txt.annotation",
            "--write",
        ]);
        match cli.command {
            Command::Merge(args) => {
                assert_eq!(args.annotation, PathBuf::from("ship.txt.annotation"));
                assert!(args.write);
                assert!(args.filename.is_none());
            }
            _ => panic!("Expected Merge command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["ssdtag", "refresh", "ssds", "-vv", "--dry-run", "-f", "json", "-n", "5"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.dry_run);
        assert_eq!(cli.format, Some(CliFormat::Json));
        match cli.command {
            Command::Refresh(args) => assert_eq!(args.max_documents, Some(5)),
            _ => panic!("Expected Refresh command"),
        }
    }

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["ssdtag"]).is_err());
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Plain.into();
        assert_eq!(format, crate::config::OutputFormat::Plain);
    }
}
