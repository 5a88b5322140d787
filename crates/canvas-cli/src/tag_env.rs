//! Render instance tags as shell `export` lines

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::warn;

/// One `export KEY='value'` line per tag, keys in sorted order
///
/// Keys that are not valid shell identifiers are skipped.
pub fn render_exports(tags: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in tags {
        if !is_identifier(key) {
            warn!(%key, "skipping tag that is not a valid variable name");
            continue;
        }
        out.push_str("export ");
        out.push_str(key);
        out.push('=');
        out.push_str(&shell_quote(value));
        out.push('\n');
    }
    out
}

/// Append rendered exports to `path`, creating it if needed
///
/// # Errors
/// Returns error if the file cannot be opened or written
pub fn append_to(path: &Path, exports: &str) -> eyre::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| eyre::eyre!("failed to open {}: {e}", path.display()))?;
    file.write_all(exports.as_bytes())?;
    Ok(())
}

/// Single-quote `value` for POSIX shells
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
