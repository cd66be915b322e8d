//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use htmlbundle_core::BundleManifest;
use htmlbundle_core::ExtractionResult;
use htmlbundle_core::ResolvedFile;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    fn headline(&self, text: &str) {
        if self.use_colors {
            self.line(&format!("{} {text}", style("✓").green().bold()));
        } else {
            self.line(text);
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, c) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    fn display_root(relative: &str) -> &str {
        if relative.is_empty() { "." } else { relative }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(&self, result: &ExtractionResult) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline("Extraction complete");
        self.line(&format!("  Bundle root:     {}", result.bundle_root.display()));
        self.line(&format!(
            "  Entry document:  {}",
            result.entry_document_path.display()
        ));
        self.line(&format!(
            "  Relative root:   {}",
            Self::display_root(&result.relative_bundle_root)
        ));
        self.line(&format!(
            "  Files extracted: {}",
            Self::format_number(result.files_extracted)
        ));
        self.line(&format!(
            "  Total size:      {}",
            humanize_bytes(result.bytes_written)
        ));

        if self.verbose {
            self.line(&format!("  Directories:     {}", result.directories_created));
            self.line(&format!("  Strategy:        {}", result.strategy));
            self.line(&format!("  Duration:        {:?}", result.duration));
        }

        Ok(())
    }

    fn format_manifest(&self, manifest: &BundleManifest) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.verbose {
            for entry in &manifest.entries {
                let kind = if entry.is_directory() { "d" } else { "-" };
                self.line(&format!(
                    "{kind} {:>10}  {}",
                    humanize_bytes(entry.uncompressed_size()),
                    entry.normalized_name()
                ));
            }
            self.line("");
        }

        self.headline("Bundle is valid");
        self.line(&format!(
            "  Entry document:  {} ({})",
            manifest.entry_document.path, manifest.entry_document.strategy
        ));
        self.line(&format!(
            "  Relative root:   {}",
            Self::display_root(manifest.entry_document.relative_root())
        ));
        self.line(&format!(
            "  Total: {} files, {}",
            Self::format_number(manifest.file_count),
            humanize_bytes(manifest.total_bytes)
        ));

        Ok(())
    }

    fn format_resolved(&self, file: &ResolvedFile) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.line(&file.path().display().to_string());
        for (name, value) in file.headers() {
            if self.use_colors {
                self.line(&format!("{}: {value}", style(name).cyan()));
            } else {
                self.line(&format!("{name}: {value}"));
            }
        }

        Ok(())
    }

    fn format_cleanup(&self, dir: &Path) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if dir.exists() {
            let message = format!("Could not fully remove {}", dir.display());
            if self.use_colors {
                self.line(&format!("{} {message}", style("⚠").yellow().bold()));
            } else {
                self.line(&format!("WARNING: {message}"));
            }
        } else {
            self.headline(&format!("Removed {}", dir.display()));
        }

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(999), "999");
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_display_root() {
        assert_eq!(HumanFormatter::display_root(""), ".");
        assert_eq!(HumanFormatter::display_root("app"), "app");
    }
}
