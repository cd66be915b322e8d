//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::load_policy;
use crate::error::add_bundle_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use htmlbundle_core::BundleExtractor;
use htmlbundle_core::NoopProgress;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let policy = load_policy(&args.policy)?;
    let extractor = BundleExtractor::new(policy);

    let result = if show_progress {
        let mut progress = CliProgress::new("Extracting");
        add_bundle_context(
            extractor.extract_with_progress(&args.archive, &args.dest, &mut progress),
            &args.archive,
        )?
    } else {
        let mut noop = NoopProgress;
        add_bundle_context(
            extractor.extract_with_progress(&args.archive, &args.dest, &mut noop),
            &args.archive,
        )?
    };

    formatter.format_extraction_result(&result)
}
