//! Policy loading: optional TOML file, then command-line overrides.

use crate::cli::PolicyArgs;
use anyhow::Context;
use anyhow::Result;
use htmlbundle_core::BundlePolicy;
use std::fs;
use std::path::Path;

/// Builds the effective policy for a command.
pub fn load_policy(args: &PolicyArgs) -> Result<BundlePolicy> {
    let base = match &args.policy {
        Some(path) => read_policy_file(path)?,
        None => BundlePolicy::default(),
    };

    let mut builder = base.to_builder();
    if let Some(max_files) = args.max_files {
        builder = builder.max_files(max_files);
    }
    if let Some(max_total_size) = args.max_total_size {
        builder = builder.max_total_bytes(max_total_size);
    }
    for ext in &args.forbid {
        builder = builder.forbid_extension(ext);
    }

    let policy = builder.build();
    tracing::debug!(
        max_files = policy.max_files(),
        max_total_bytes = policy.max_total_bytes(),
        forbidden = policy.forbidden_extensions().len(),
        "effective bundle policy"
    );
    Ok(policy)
}

fn read_policy_file(path: &Path) -> Result<BundlePolicy> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read policy file '{}'", path.display()))?;
    toml::from_str(&text)
        .with_context(|| format!("invalid policy file '{}'", path.display()))
}
