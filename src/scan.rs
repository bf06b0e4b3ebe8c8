//! Source discovery: recursive suffix scans over an input tree.

use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

/// Suffix of the generic CSV exports.
const CSV_SUFFIX: &str = ".csv";
/// Suffixes of a Mitsuba2 ior table pair.
const ETA_SUFFIX: &str = ".eta.spd";
const K_SUFFIX: &str = ".k.spd";

/// A discovered CSV export: material name plus source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSource {
    pub name: String,
    pub path: PathBuf,
}

/// A discovered Mitsuba2 table pair. The `.k.spd` sibling is assumed to sit
/// next to the `.eta.spd` file and is not checked here; a missing sibling
/// fails at read time and aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdSource {
    pub name: String,
    pub eta_path: PathBuf,
    pub k_path: PathBuf,
}

/// Recursively enumerate `.csv` files under `root`. Lazy; walk errors
/// surface as `Err` items. Materials are independent, so enumeration order
/// does not matter.
pub fn csv_sources(root: &Path) -> impl Iterator<Item = Result<CsvSource>> {
    WalkDir::new(root).into_iter().filter_map(|entry| match entry {
        Ok(entry) => {
            let name = material_name(&entry, CSV_SUFFIX)?;
            Some(Ok(CsvSource {
                name,
                path: entry.into_path(),
            }))
        }
        Err(err) => Some(Err(err.into())),
    })
}

/// Recursively enumerate `.eta.spd` files under `root`, pairing each with
/// its `.k.spd` sibling.
pub fn spd_sources(root: &Path) -> impl Iterator<Item = Result<SpdSource>> {
    WalkDir::new(root).into_iter().filter_map(|entry| match entry {
        Ok(entry) => {
            let name = material_name(&entry, ETA_SUFFIX)?;
            let eta_path = entry.into_path();
            let k_path = eta_path.with_file_name(format!("{name}{K_SUFFIX}"));
            Some(Ok(SpdSource {
                name,
                eta_path,
                k_path,
            }))
        }
        Err(err) => Some(Err(err.into())),
    })
}

/// Material name for a directory entry: the filename with `suffix` removed,
/// or `None` when the entry is not a matching file.
fn material_name(entry: &walkdir::DirEntry, suffix: &str) -> Option<String> {
    if !entry.file_type().is_file() {
        return None;
    }
    let file_name = entry.file_name().to_str()?;
    file_name.strip_suffix(suffix).map(str::to_string)
}
