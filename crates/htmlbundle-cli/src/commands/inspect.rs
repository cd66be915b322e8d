//! Inspect command implementation

use crate::cli::InspectArgs;
use crate::config::load_policy;
use crate::error::add_bundle_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use htmlbundle_core::inspect_bundle;

pub fn execute(args: &InspectArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let policy = load_policy(&args.policy)?;
    let manifest = add_bundle_context(inspect_bundle(&args.archive, &policy), &args.archive)?;
    formatter.format_manifest(&manifest)
}
