use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use super::model::{MaterialRecord, SpectralSample, SpectralTable};
use crate::error::ConvertError;

/// Markers delimiting the labeled sections of a refractiveindex.info CSV
/// export.
const ETA_MARKER: &str = "wl,n";
const K_MARKER: &str = "wl,k";

/// CSV wavelengths arrive in micrometers; tables are kept in nanometers.
const UM_TO_NM: f64 = 1e3;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Load one material from a refractiveindex.info-style CSV export.
pub fn load_refractive_csv(name: &str, path: &Path) -> Result<MaterialRecord> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_refractive_csv(name, &text)
        .with_context(|| format!("parsing {}", path.display()))
}

/// Load one material from a Mitsuba2 `.eta.spd` / `.k.spd` pair. Both tables
/// are mandatory; the dataset always ships them together.
pub fn load_spd_pair(name: &str, eta_path: &Path, k_path: &Path) -> Result<MaterialRecord> {
    let eta = read_spd(eta_path)?;
    let k = read_spd(k_path)?;
    Ok(MaterialRecord {
        name: name.to_string(),
        eta,
        k: Some(k),
    })
}

// ---------------------------------------------------------------------------
// refractiveindex.info CSV format
// ---------------------------------------------------------------------------

/// The export embeds one or two labeled sections in a single file:
///
/// ```text
/// wl,n
/// 0.30,1.53
/// 0.90,1.51
/// wl,k
/// 0.30,0.004
/// 0.90,0.001
/// ```
///
/// Wavelengths are micrometers; the `wl,k` section is optional. Sections are
/// located by substring search, matching what existing exports expect.
pub fn parse_refractive_csv(name: &str, text: &str) -> Result<MaterialRecord> {
    let eta_at = text
        .find(ETA_MARKER)
        .ok_or(ConvertError::MissingMarker(ETA_MARKER))?;
    let eta_from = eta_at + ETA_MARKER.len();

    let (eta_text, k_text) = match text.find(K_MARKER) {
        // A `wl,k` marker sitting before the eta section leaves an empty eta
        // table, reported below.
        Some(k_at) => (
            &text[eta_from..k_at.max(eta_from)],
            Some(&text[k_at + K_MARKER.len()..]),
        ),
        None => (&text[eta_from..], None),
    };

    let mut eta = parse_section(eta_text).context("in `wl,n` section")?;
    eta.trim_to_visible();
    if eta.is_empty() {
        return Err(ConvertError::EmptyTable(ETA_MARKER).into());
    }

    let k = match k_text {
        Some(k_text) => {
            let mut k = parse_section(k_text).context("in `wl,k` section")?;
            k.trim_to_visible();
            if k.is_empty() || k.is_negligible() {
                debug!("{name}: extinction data absent or negligible, dropping K");
                None
            } else {
                Some(k)
            }
        }
        None => None,
    };

    Ok(MaterialRecord {
        name: name.to_string(),
        eta,
        k,
    })
}

/// Parse one section's `wavelength,value` rows. Micrometers in, nanometers
/// out. Blank lines are skipped; a non-numeric or wrong-arity row is fatal.
fn parse_section(text: &str) -> Result<SpectralTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut samples = Vec::new();
    for (row, record) in reader.deserialize::<(f64, f64)>().enumerate() {
        let (wl_um, value) = record.with_context(|| format!("row {row}"))?;
        samples.push(SpectralSample {
            wavelength_nm: wl_um * UM_TO_NM,
            value,
        });
    }
    Ok(SpectralTable::new(samples))
}

// ---------------------------------------------------------------------------
// Mitsuba2 .spd format
// ---------------------------------------------------------------------------

fn read_spd(path: &Path) -> Result<SpectralTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let table = parse_spd(&text).with_context(|| format!("parsing {}", path.display()))?;
    debug!("{}: {} samples", path.display(), table.len());
    Ok(table)
}

/// Whitespace-delimited `wavelength value` rows, already in nanometers and
/// pre-trimmed to the visible band upstream, so no range normalization here.
/// `#` starts a comment running to end of line.
pub fn parse_spd(text: &str) -> Result<SpectralTable> {
    let mut samples = Vec::new();
    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let &[wl, value] = fields.as_slice() else {
            return Err(malformed(line_no, raw));
        };
        let sample = SpectralSample {
            wavelength_nm: wl.parse().map_err(|_| malformed(line_no, raw))?,
            value: value.parse().map_err(|_| malformed(line_no, raw))?,
        };
        samples.push(sample);
    }
    if samples.is_empty() {
        return Err(ConvertError::EmptyTable("spd").into());
    }
    Ok(SpectralTable::new(samples))
}

fn malformed(line_no: usize, raw: &str) -> anyhow::Error {
    ConvertError::MalformedRow {
        line: line_no + 1,
        text: raw.trim().to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wavelengths(t: &SpectralTable) -> Vec<f64> {
        t.samples().iter().map(|s| s.wavelength_nm).collect()
    }

    #[test]
    fn parses_eta_and_k_sections() {
        let text = "wl,n\n0.360,1.5\n0.5,1.6\n0.83,1.7\nwl,k\n0.360,2.0\n0.5,2.1\n0.83,2.2\n";
        let record = parse_refractive_csv("gold", text).unwrap();
        assert_eq!(wavelengths(&record.eta), vec![360.0, 500.0, 830.0]);
        let k = record.k.expect("extinction table present");
        assert_eq!(wavelengths(&k), vec![360.0, 500.0, 830.0]);
        assert_eq!(k.samples()[1].value, 2.1);
    }

    #[test]
    fn scales_micrometers_to_nanometers() {
        let record = parse_refractive_csv("glass", "wl,n\n0.360,1.5\n0.5,1.6\n0.83,1.7\n").unwrap();
        assert_eq!(wavelengths(&record.eta), vec![360.0, 500.0, 830.0]);
    }

    #[test]
    fn missing_k_marker_yields_no_k() {
        let record = parse_refractive_csv("glass", "wl,n\n0.3,1.5\n0.4,1.6\n0.9,1.4\n").unwrap();
        assert!(record.k.is_none());
        // 300 and 900 survive as boundary samples next to in-range neighbors.
        assert_eq!(wavelengths(&record.eta), vec![300.0, 400.0, 900.0]);
    }

    #[test]
    fn near_zero_extinction_is_dropped() {
        let text = "wl,n\n0.4,1.5\n0.5,1.6\nwl,k\n0.4,0.0001\n0.5,-0.0005\n";
        let record = parse_refractive_csv("glass", text).unwrap();
        assert!(record.k.is_none());
    }

    #[test]
    fn empty_k_section_is_dropped() {
        let record = parse_refractive_csv("glass", "wl,n\n0.5,1.5\nwl,k\n").unwrap();
        assert!(record.k.is_none());
        assert_eq!(record.eta.len(), 1);
    }

    #[test]
    fn empty_eta_is_an_error() {
        let err = parse_refractive_csv("glass", "wl,n\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref(),
            Some(ConvertError::EmptyTable(_))
        ));
    }

    #[test]
    fn missing_eta_marker_is_an_error() {
        let err = parse_refractive_csv("glass", "0.5,1.5\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref(),
            Some(ConvertError::MissingMarker(_))
        ));
    }

    #[test]
    fn malformed_row_is_an_error() {
        assert!(parse_refractive_csv("glass", "wl,n\n0.5,oops\n").is_err());
        assert!(parse_refractive_csv("glass", "wl,n\n0.5\n").is_err());
    }

    #[test]
    fn spd_parses_rows_skipping_comments() {
        let table = parse_spd("# header\n400 1.1\n500 1.2 # inline\n\n600\t1.3\n").unwrap();
        assert_eq!(wavelengths(&table), vec![400.0, 500.0, 600.0]);
        assert_eq!(table.samples()[2].value, 1.3);
    }

    #[test]
    fn spd_rejects_wrong_arity_rows() {
        let err = parse_spd("400\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref(),
            Some(ConvertError::MalformedRow { line: 1, .. })
        ));
        assert!(parse_spd("400 1.1 9\n").is_err());
    }

    #[test]
    fn spd_rejects_empty_input() {
        let err = parse_spd("# nothing here\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref(),
            Some(ConvertError::EmptyTable(_))
        ));
    }
}
