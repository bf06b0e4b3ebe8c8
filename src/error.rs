use thiserror::Error;

/// Malformed-data errors. Any one of these is fatal: the run aborts on the
/// first bad material, and files already written stay on disk.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A parsed table ended up with no samples.
    #[error("no samples in `{0}` table")]
    EmptyTable(&'static str),

    /// The CSV export lacks the section marker introducing its data.
    #[error("missing `{0}` section marker")]
    MissingMarker(&'static str),

    /// A data row did not hold exactly two numeric fields.
    #[error("line {line}: expected a `wavelength value` pair, got `{text}`")]
    MalformedRow { line: usize, text: String },
}
