//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "htmlbundle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate and extract a bundle archive
    Extract(ExtractArgs),
    /// Validate a bundle archive without extracting it
    Inspect(InspectArgs),
    /// Resolve a request path inside an extracted bundle
    Resolve(ResolveArgs),
    /// Stream a file from an extracted bundle to stdout
    Cat(ResolveArgs),
    /// Remove an extracted bundle directory
    Cleanup(CleanupArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Extract(_) => "extract",
            Self::Inspect(_) => "inspect",
            Self::Resolve(_) => "resolve",
            Self::Cat(_) => "cat",
            Self::Cleanup(_) => "cleanup",
            Self::Completion(_) => "completion",
        }
    }
}

/// Policy flags shared by `extract` and `inspect`.
#[derive(clap::Args)]
pub struct PolicyArgs {
    /// TOML file with policy settings (flags override it)
    #[arg(long, value_name = "FILE")]
    pub policy: Option<PathBuf>,

    /// Maximum number of files in the bundle
    #[arg(long, value_name = "N")]
    pub max_files: Option<usize>,

    /// Maximum total uncompressed size (accepts K, M, G, T suffixes)
    #[arg(long, value_name = "SIZE", value_parser = parse_byte_size)]
    pub max_total_size: Option<u64>,

    /// Additional forbidden extension (can be repeated)
    #[arg(long = "forbid", value_name = "EXT")]
    pub forbid: Vec<String>,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the bundle archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Destination directory (created if missing)
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the bundle archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(clap::Args)]
pub struct ResolveArgs {
    /// Bundle root printed by `extract`
    #[arg(value_name = "BUNDLE_ROOT")]
    pub bundle_root: PathBuf,

    /// Request path relative to the bundle root
    #[arg(value_name = "PATH")]
    pub path: String,
}

#[derive(clap::Args)]
pub struct CleanupArgs {
    /// Directory to remove
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix(['T', 't']) {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix(['G', 'g']) {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix(['M', 'm']) {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix(['K', 'k']) {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_parse_byte_size() {
        assert_eq!(parse_byte_size("100").unwrap(), 100);
        assert_eq!(parse_byte_size("1K").unwrap(), 1024);
        assert_eq!(parse_byte_size("2M").unwrap(), 2 * 1024 * 1024);
        assert_eq!(parse_byte_size("50m").unwrap(), 50 * 1024 * 1024);
        assert_eq!(parse_byte_size("3G").unwrap(), 3 * 1024 * 1024 * 1024);
        assert_eq!(parse_byte_size("1T").unwrap(), 1024_u64.pow(4));
        assert!(parse_byte_size("invalid").is_err());
        assert!(parse_byte_size("").is_err());
    }

    #[test]
    fn test_parse_byte_size_overflow() {
        assert!(parse_byte_size("18446744073709551615K").is_err());
        assert!(parse_byte_size("17592186044416G").is_err());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract_with_policy_flags() {
        let cli = Cli::try_parse_from([
            "htmlbundle",
            "extract",
            "site.zip",
            "out",
            "--max-files",
            "10",
            "--max-total-size",
            "1M",
            "--forbid",
            "php",
            "--forbid",
            ".py",
        ])
        .unwrap();

        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.policy.max_files, Some(10));
        assert_eq!(args.policy.max_total_size, Some(1024 * 1024));
        assert_eq!(args.policy.forbid, vec!["php", ".py"]);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(["htmlbundle", "-v", "-q", "cleanup", "x"]);
        assert!(result.is_err());
    }
}
