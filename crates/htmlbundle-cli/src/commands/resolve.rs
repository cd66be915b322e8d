//! Resolve command implementation

use crate::cli::ResolveArgs;
use crate::error::add_bundle_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use htmlbundle_core::BundleFileServer;

pub fn execute(args: &ResolveArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let file = add_bundle_context(
        BundleFileServer::new().resolve(&args.bundle_root, &args.path),
        &args.bundle_root,
    )?;
    formatter.format_resolved(&file)
}
