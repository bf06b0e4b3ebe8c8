//! Per-format conversion drivers: scan → parse → emit, one material at a
//! time. Fully sequential; the first failure aborts the run and anything
//! already written stays on disk.

use std::path::Path;

use anyhow::Result;
use log::debug;

use crate::data::{loader, writer};
use crate::scan;

/// Subdirectory of a Mitsuba2 checkout holding the ior tables.
const MITSUBA_IOR_DIR: &str = "resources/data/ior";

/// Convert every `.csv` export under `root`, writing one JSON file per
/// material into `out_dir`.
pub fn convert_csv_tree(root: &Path, out_dir: &Path) -> Result<()> {
    for source in scan::csv_sources(root) {
        let source = source?;
        println!("Generating {}", source.name);
        let record = loader::load_refractive_csv(&source.name, &source.path)?;
        let path = writer::write_material(&record, out_dir)?;
        debug!(
            "{}: {} eta samples, {} k samples",
            path.display(),
            record.eta.len(),
            record.k.as_ref().map_or(0, |k| k.len()),
        );
    }
    Ok(())
}

/// Convert every `.eta.spd`/`.k.spd` pair of a Mitsuba2 source checkout,
/// writing one JSON file per material into `out_dir`.
pub fn convert_mitsuba_tree(root: &Path, out_dir: &Path) -> Result<()> {
    for source in scan::spd_sources(&root.join(MITSUBA_IOR_DIR)) {
        let source = source?;
        println!("Generating {}", source.name);
        let record = loader::load_spd_pair(&source.name, &source.eta_path, &source.k_path)?;
        writer::write_material(&record, out_dir)?;
    }
    Ok(())
}
