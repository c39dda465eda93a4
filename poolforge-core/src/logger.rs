use crate::{balance::BalanceContext, error::PoolforgeError};
use csv::{Reader, Writer};
use poolforge_schemas::dosing::WaterBalanceReport;
use serde::{Deserialize, Serialize};
use std::fs;

/// One dosing step as written to the CSV log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosingLogEntry {
    pub timestamp: String,
    pub pool_type: String,
    pub volume_gallons: f64,
    pub key: String,
    pub parameter: String,
    pub current: f64,
    pub target: f64,
    pub dose: Option<String>,
    pub anticipated_ph: Option<f64>,
    pub secondary_dose: Option<String>,
    pub note: Option<String>,
}

pub struct DosingLogger {
    writer: Writer<fs::File>,
    path: String,
}

impl DosingLogger {
    pub fn new(path: &str) -> Result<Self, PoolforgeError> {
        let writer =
            Writer::from_path(path).map_err(|e| PoolforgeError::CsvError(path.to_string(), e))?;
        Ok(Self {
            writer,
            path: path.to_string(),
        })
    }

    /// Appends every step of `report`, all stamped with `timestamp`. Returns the row count.
    pub fn log_report(
        &mut self,
        timestamp: &str,
        context: &BalanceContext,
        report: &WaterBalanceReport,
    ) -> Result<usize, PoolforgeError> {
        for step in &report.steps {
            let entry = DosingLogEntry {
                timestamp: timestamp.to_string(),
                pool_type: context.pool_type.as_str().to_string(),
                volume_gallons: context.volume_gallons,
                key: step.key.as_str().to_string(),
                parameter: step.parameter.clone(),
                current: step.current,
                target: step.target,
                dose: step.dose.clone(),
                anticipated_ph: step.anticipated_ph,
                secondary_dose: step.secondary_dose().map(str::to_string),
                note: step.note.clone(),
            };
            self.writer
                .serialize(entry)
                .map_err(|e| PoolforgeError::CsvError(self.path.clone(), e))?;
        }
        self.writer
            .flush()
            .map_err(|e| PoolforgeError::FileIO(self.path.clone(), e))?;
        Ok(report.steps.len())
    }
}

pub fn read_log(path: &str) -> Result<Vec<DosingLogEntry>, PoolforgeError> {
    let mut reader =
        Reader::from_path(path).map_err(|e| PoolforgeError::CsvError(path.to_string(), e))?;
    reader
        .deserialize()
        .collect::<Result<Vec<DosingLogEntry>, _>>()
        .map_err(|e| PoolforgeError::CsvError(path.to_string(), e))
}
