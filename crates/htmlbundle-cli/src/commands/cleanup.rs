//! Cleanup command implementation

use crate::cli::CleanupArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use htmlbundle_core::cleanup_bundle;

pub fn execute(args: &CleanupArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    cleanup_bundle(&args.dir);
    formatter.format_cleanup(&args.dir)
}
