//! Bundle policy configuration.

use std::collections::BTreeSet;

use serde::Deserialize;

/// Default maximum number of files in a bundle.
pub const DEFAULT_MAX_FILES: usize = 1000;

/// Default maximum total uncompressed size of a bundle (50 MiB).
pub const DEFAULT_MAX_TOTAL_BYTES: u64 = 50 * 1024 * 1024;

/// Extensions rejected by the default policy.
pub const DEFAULT_FORBIDDEN_EXTENSIONS: &[&str] = &[
    ".exe", ".dll", ".bat", ".cmd", ".com", ".msi", ".scr", ".ps1", ".vbs", ".sh", ".jar", ".app",
    ".apk", ".dmg",
];

/// Limits applied to every uploaded bundle.
///
/// A policy is built once at process start and shared read-only afterwards.
/// Pass it by reference (`&BundlePolicy`) or wrap it in an `Arc` when it has
/// to cross threads.
///
/// Deserialization rejects unknown keys and fills missing keys from the
/// defaults.
///
/// # Examples
///
/// ```
/// use htmlbundle_core::BundlePolicy;
///
/// let policy = BundlePolicy::builder()
///     .max_files(200)
///     .max_total_bytes(10 * 1024 * 1024)
///     .forbid_extension("EXE")
///     .build();
///
/// assert!(policy.is_extension_forbidden("Setup.exe"));
/// assert!(!policy.is_extension_forbidden("index.html"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawPolicy")]
pub struct BundlePolicy {
    max_files: usize,
    max_total_bytes: u64,
    forbidden_extensions: BTreeSet<String>,
}

/// Wire form of [`BundlePolicy`]; extensions are normalized on conversion.
#[derive(Deserialize)]
#[serde(deny_unknown_fields, default)]
struct RawPolicy {
    max_files: usize,
    max_total_bytes: u64,
    forbidden_extensions: Vec<String>,
}

impl Default for RawPolicy {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_total_bytes: DEFAULT_MAX_TOTAL_BYTES,
            forbidden_extensions: DEFAULT_FORBIDDEN_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl From<RawPolicy> for BundlePolicy {
    fn from(raw: RawPolicy) -> Self {
        Self::builder()
            .max_files(raw.max_files)
            .max_total_bytes(raw.max_total_bytes)
            .forbidden_extensions(raw.forbidden_extensions)
            .build()
    }
}

impl Default for BundlePolicy {
    /// Creates a policy with the default limits.
    ///
    /// - `max_files`: 1000
    /// - `max_total_bytes`: 50 MiB
    /// - `forbidden_extensions`: [`DEFAULT_FORBIDDEN_EXTENSIONS`]
    fn default() -> Self {
        RawPolicy::default().into()
    }
}

impl BundlePolicy {
    /// Starts a builder seeded with the default limits.
    #[must_use]
    pub fn builder() -> BundlePolicyBuilder {
        BundlePolicyBuilder {
            max_files: DEFAULT_MAX_FILES,
            max_total_bytes: DEFAULT_MAX_TOTAL_BYTES,
            forbidden_extensions: DEFAULT_FORBIDDEN_EXTENSIONS
                .iter()
                .map(|ext| normalize_extension(ext))
                .collect(),
        }
    }

    /// Starts a builder seeded with this policy's values.
    #[must_use]
    pub fn to_builder(&self) -> BundlePolicyBuilder {
        BundlePolicyBuilder {
            max_files: self.max_files,
            max_total_bytes: self.max_total_bytes,
            forbidden_extensions: self.forbidden_extensions.clone(),
        }
    }

    /// Maximum count of non-directory entries.
    #[must_use]
    pub fn max_files(&self) -> usize {
        self.max_files
    }

    /// Maximum cumulative declared uncompressed size in bytes.
    #[must_use]
    pub fn max_total_bytes(&self) -> u64 {
        self.max_total_bytes
    }

    /// Forbidden suffixes, lowercase with a leading dot.
    #[must_use]
    pub fn forbidden_extensions(&self) -> &BTreeSet<String> {
        &self.forbidden_extensions
    }

    /// Returns `true` if the lower-cased name ends with a forbidden suffix.
    #[must_use]
    pub fn is_extension_forbidden(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.forbidden_extensions
            .iter()
            .any(|ext| lower.ends_with(ext.as_str()))
    }
}

/// Builder for [`BundlePolicy`].
#[derive(Debug, Clone)]
pub struct BundlePolicyBuilder {
    max_files: usize,
    max_total_bytes: u64,
    forbidden_extensions: BTreeSet<String>,
}

impl BundlePolicyBuilder {
    /// Sets the maximum number of files.
    pub fn max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Sets the maximum total uncompressed size in bytes.
    pub fn max_total_bytes(mut self, max_total_bytes: u64) -> Self {
        self.max_total_bytes = max_total_bytes;
        self
    }

    /// Replaces the forbidden extension set.
    pub fn forbidden_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.forbidden_extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .filter(|ext| ext.len() > 1)
            .collect();
        self
    }

    /// Adds one extension to the forbidden set.
    pub fn forbid_extension(mut self, extension: &str) -> Self {
        let ext = normalize_extension(extension);
        if ext.len() > 1 {
            self.forbidden_extensions.insert(ext);
        }
        self
    }

    /// Finalizes the policy.
    pub fn build(self) -> BundlePolicy {
        BundlePolicy {
            max_files: self.max_files,
            max_total_bytes: self.max_total_bytes,
            forbidden_extensions: self.forbidden_extensions,
        }
    }
}

/// Lower-cases an extension and ensures it starts with a dot.
fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim().to_lowercase();
    if trimmed.starts_with('.') {
        trimmed
    } else {
        format!(".{trimmed}")
    }
}
