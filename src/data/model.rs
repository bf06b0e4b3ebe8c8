use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Visible-range and negligibility constants
// ---------------------------------------------------------------------------

/// Lower edge of the visible band covered by emitted tables, nanometers.
pub const VISIBLE_MIN_NM: f64 = 360.0;
/// Upper edge of the visible band, nanometers.
pub const VISIBLE_MAX_NM: f64 = 830.0;
/// Extinction tables whose values all stay below this magnitude carry no
/// usable signal and are dropped.
pub const NEGLIGIBLE_K: f64 = 1e-3;

// ---------------------------------------------------------------------------
// SpectralSample – one (wavelength, value) measurement
// ---------------------------------------------------------------------------

/// A single measurement: wavelength in nanometers plus the dimensionless
/// index value at that wavelength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralSample {
    pub wavelength_nm: f64,
    pub value: f64,
}

// -- Manual Serialize: the material loader expects a `[wavelength, value]`
//    pair, not an object --

impl Serialize for SpectralSample {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.wavelength_nm, self.value).serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// SpectralTable – ordered wavelength-indexed series for one quantity
// ---------------------------------------------------------------------------

/// Measurement series for one optical quantity, ascending in wavelength.
/// Source data ships pre-sorted with unique wavelengths; parsers preserve
/// input order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SpectralTable {
    samples: Vec<SpectralSample>,
}

impl SpectralTable {
    pub fn new(samples: Vec<SpectralSample>) -> Self {
        SpectralTable { samples }
    }

    pub fn samples(&self) -> &[SpectralSample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the table holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Trim the table to the visible band, keeping one out-of-range boundary
    /// sample on each affected side as an interpolation endpoint.
    ///
    /// Leading samples are discarded while at least two remain and the
    /// *second* sample is still below [`VISIBLE_MIN_NM`]; trailing samples
    /// analogously against [`VISIBLE_MAX_NM`]. A non-empty table never
    /// trims to empty, and a table already in range is untouched.
    pub fn trim_to_visible(&mut self) {
        let mut start = 0;
        while self.samples.len() - start >= 2
            && self.samples[start + 1].wavelength_nm < VISIBLE_MIN_NM
        {
            start += 1;
        }
        self.samples.drain(..start);

        let mut end = self.samples.len();
        while end >= 2 && self.samples[end - 2].wavelength_nm > VISIBLE_MAX_NM {
            end -= 1;
        }
        self.samples.truncate(end);
    }

    /// Whether every value is below the [`NEGLIGIBLE_K`] magnitude.
    pub fn is_negligible(&self) -> bool {
        self.samples.iter().all(|s| s.value.abs() < NEGLIGIBLE_K)
    }
}

// ---------------------------------------------------------------------------
// MaterialRecord – one material ready for emission
// ---------------------------------------------------------------------------

/// A named material with its real index table and, when the source carries
/// meaningful extinction data, the imaginary index table.
#[derive(Debug, Clone)]
pub struct MaterialRecord {
    /// Material name, derived from the source filename.
    pub name: String,
    /// Real part of the complex index of refraction.
    pub eta: SpectralTable,
    /// Imaginary part (extinction coefficient), absent for dielectrics and
    /// for sources whose extinction data is negligible.
    pub k: Option<SpectralTable>,
}
