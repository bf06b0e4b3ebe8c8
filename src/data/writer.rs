use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::{MaterialRecord, SpectralTable};

// ---------------------------------------------------------------------------
// Wire schema
// ---------------------------------------------------------------------------

/// One spectral quantity as the material loader reads it. Key names, nesting
/// and the array-of-pairs shape are an external contract; keep them intact.
#[derive(Debug, Serialize)]
struct SampledSpectrumTexture<'a> {
    #[serde(rename = "Type")]
    kind: &'static str,
    #[serde(rename = "Array")]
    array: &'a SpectralTable,
}

impl<'a> SampledSpectrumTexture<'a> {
    fn new(table: &'a SpectralTable) -> Self {
        SampledSpectrumTexture {
            kind: "SampledSpectrumTexture",
            array: table,
        }
    }
}

#[derive(Debug, Serialize)]
struct MaterialObject<'a> {
    #[serde(rename = "Eta")]
    eta: SampledSpectrumTexture<'a>,
    #[serde(rename = "K", skip_serializing_if = "Option::is_none")]
    k: Option<SampledSpectrumTexture<'a>>,
}

// ---------------------------------------------------------------------------
// Emission
// ---------------------------------------------------------------------------

/// Write `<out_dir>/<name>.json` for one material, overwriting any previous
/// file of the same name. `out_dir` must already exist.
pub fn write_material(record: &MaterialRecord, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(format!("{}.json", record.name));
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

    let obj = MaterialObject {
        eta: SampledSpectrumTexture::new(&record.eta),
        k: record.k.as_ref().map(SampledSpectrumTexture::new),
    };
    serde_json::to_writer(BufWriter::new(file), &obj)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SpectralSample;

    fn table(points: &[(f64, f64)]) -> SpectralTable {
        SpectralTable::new(
            points
                .iter()
                .map(|&(wavelength_nm, value)| SpectralSample {
                    wavelength_nm,
                    value,
                })
                .collect(),
        )
    }

    #[test]
    fn emits_the_fixed_schema() {
        let dir = tempfile::tempdir().unwrap();
        let record = MaterialRecord {
            name: "copper".into(),
            eta: table(&[(400.0, 1.1)]),
            k: Some(table(&[(400.0, 2.3)])),
        };
        let path = write_material(&record, dir.path()).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            text,
            r#"{"Eta":{"Type":"SampledSpectrumTexture","Array":[[400.0,1.1]]},"K":{"Type":"SampledSpectrumTexture","Array":[[400.0,2.3]]}}"#
        );
    }

    #[test]
    fn omits_absent_extinction() {
        let dir = tempfile::tempdir().unwrap();
        let record = MaterialRecord {
            name: "glass".into(),
            eta: table(&[(400.0, 1.5), (500.0, 1.6)]),
            k: None,
        };
        let path = write_material(&record, dir.path()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert!(json.get("Eta").is_some());
        assert!(json.get("K").is_none());
    }

    #[test]
    fn missing_output_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let record = MaterialRecord {
            name: "glass".into(),
            eta: table(&[(400.0, 1.5)]),
            k: None,
        };
        assert!(write_material(&record, &dir.path().join("absent")).is_err());
    }
}
