pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read FAQ source at {path:?}.")]
	Read { path: std::path::PathBuf, source: std::io::Error },
	#[error(transparent)]
	Csv(#[from] csv::Error),
	#[error("FAQ source is missing required column {column:?}.")]
	MissingColumn { column: String },
	#[error("FAQ source contains no usable rows.")]
	Empty,
}
