// src/checkpoint.rs
// =============================================================================
// Saves the url tree to disk.
//
// The forest is written as an indented JSON array (4 spaces), one object per
// seed:
//
//   [
//       {
//           "url": "https://example.com/",
//           "trees": [ ...children, same shape... ]
//       }
//   ]
//
// The file is written to a temporary sibling first and then renamed over the
// target, so a crash or a second Ctrl-C mid-write never leaves half a file.
// =============================================================================

use crate::crawl::{CrawlNode, Forest};
use crate::error::{CrawlError, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Renders the forest exactly as it is stored. Same forest in, same bytes out.
pub fn render(forest: &Forest) -> Result<Vec<u8>> {
    let trees: Vec<CrawlNode> = forest.to_trees();

    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    trees.serialize(&mut serializer)?;
    Ok(out)
}

// Sibling of `path` with ".tmp" appended, never equal to `path` itself
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

// Overwrites `path` with the current forest
pub fn write_checkpoint(path: &Path, forest: &Forest) -> Result<()> {
    let encoded = render(forest)?;

    let tmp_path = temp_path(path);
    fs::write(&tmp_path, encoded).map_err(|source| CrawlError::Write {
        path: tmp_path.clone(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| CrawlError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!("saved {} url(s) to {}", forest.len(), path.display());
    Ok(())
}
