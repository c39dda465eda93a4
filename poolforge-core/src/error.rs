use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolforgeError {
    #[error("Current water measurements are missing")]
    MeasurementsNotDefined,

    #[error("Pool volume must be a positive number of gallons, got {0}")]
    InvalidVolume(f64),

    #[error("Measurement '{field}' must be a finite, non-negative number, got {value}")]
    InvalidMeasurement { field: &'static str, value: f64 },

    #[error("No regional standards found for '{0}'")]
    UnknownRegion(String),

    #[error("Chlorine product '{0}' not found")]
    UnknownChlorineProduct(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
