//! Cat command: streams a bundle file to stdout.

use crate::cli::ResolveArgs;
use crate::error::add_bundle_context;
use anyhow::Context;
use anyhow::Result;
use htmlbundle_core::BundleFileServer;
use std::io::Write;
use std::io::{self};

pub fn execute(args: &ResolveArgs) -> Result<()> {
    let file = add_bundle_context(
        BundleFileServer::new().resolve(&args.bundle_root, &args.path),
        &args.bundle_root,
    )?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let copied = add_bundle_context(file.copy_to(&mut out), &args.bundle_root)?;
    out.flush().context("failed to flush stdout")?;

    tracing::debug!(
        path = %file.path().display(),
        bytes = copied,
        "streamed bundle file"
    );
    Ok(())
}
