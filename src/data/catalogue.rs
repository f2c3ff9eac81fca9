//! Health condition catalogue loading from CSV, Parquet or spreadsheets.

use std::{
    fs::File,
    io::Cursor,
    path::{Path, PathBuf},
};

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use polars::prelude::{DataFrame, DataType, ParquetReader, PolarsError, SerReader};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// Column names read alongside the symptom text.
pub const CONDITION_COLUMN: &str = "health_condition";
pub const SPECIALIST_COLUMN: &str = "doctor_specialist";
pub const DIET_RECOMMENDATIONS_COLUMN: &str = "diet_recommendations";
pub const FOODS_TO_AVOID_COLUMN: &str = "foods_to_avoid";
pub const DIET_ROUTINE_COLUMN: &str = "diet_routine";

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("failed to open dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read Parquet dataset: {0}")]
    Parquet(#[from] PolarsError),
    #[error("failed to read spreadsheet dataset: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("missing required column '{column}' in dataset")]
    MissingColumn { column: String },
}

/// One health condition record. Position in the loaded list is its identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConditionEntry {
    pub symptoms: String,
    pub health_condition: String,
    pub doctor_specialist: String,
    pub diet_recommendations: String,
    pub foods_to_avoid: String,
    pub diet_routine: String,
}

/// Row as read from the dataset; absent cells stay `None` until coercion.
#[derive(Debug, Default)]
struct RawConditionRow {
    symptoms: Option<String>,
    health_condition: Option<String>,
    doctor_specialist: Option<String>,
    diet_recommendations: Option<String>,
    foods_to_avoid: Option<String>,
    diet_routine: Option<String>,
}

impl From<RawConditionRow> for ConditionEntry {
    fn from(value: RawConditionRow) -> Self {
        ConditionEntry {
            symptoms: value.symptoms.unwrap_or_default(),
            health_condition: value.health_condition.unwrap_or_default(),
            doctor_specialist: value.doctor_specialist.unwrap_or_default(),
            diet_recommendations: value.diet_recommendations.unwrap_or_default(),
            foods_to_avoid: value.foods_to_avoid.unwrap_or_default(),
            diet_routine: value.diet_routine.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatasetFormat {
    Csv,
    Parquet,
    Spreadsheet,
}

fn detect_format(path: &Path) -> DatasetFormat {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "parquet" => DatasetFormat::Parquet,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => DatasetFormat::Spreadsheet,
        _ => DatasetFormat::Csv,
    }
}

/// Load every row of the dataset at `path` in file order.
///
/// Only `symptom_column` is required. Missing optional columns and empty
/// cells become empty strings; no row is dropped.
pub fn load(path: &Path, symptom_column: &str) -> Result<Vec<ConditionEntry>, CatalogueError> {
    let format = detect_format(path);
    let entries = match format {
        DatasetFormat::Csv => read_csv(open(path)?, symptom_column)?,
        DatasetFormat::Parquet => read_parquet(open(path)?, symptom_column)?,
        DatasetFormat::Spreadsheet => read_spreadsheet(path, symptom_column)?,
    };
    info!(path = %path.display(), ?format, rows = entries.len(), "loaded catalogue");
    Ok(entries)
}

fn open(path: &Path) -> Result<File, CatalogueError> {
    File::open(path).map_err(|source| CatalogueError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_csv<R: std::io::Read>(
    reader: R,
    symptom_column: &str,
) -> Result<Vec<ConditionEntry>, CatalogueError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let find = |name: &str| headers.iter().position(|h| h.trim() == name);

    let symptoms_idx = find(symptom_column).ok_or_else(|| CatalogueError::MissingColumn {
        column: symptom_column.to_string(),
    })?;
    let condition_idx = find(CONDITION_COLUMN);
    let specialist_idx = find(SPECIALIST_COLUMN);
    let recommendations_idx = find(DIET_RECOMMENDATIONS_COLUMN);
    let avoid_idx = find(FOODS_TO_AVOID_COLUMN);
    let routine_idx = find(DIET_ROUTINE_COLUMN);

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        let raw = RawConditionRow {
            symptoms: cell(Some(symptoms_idx)),
            health_condition: cell(condition_idx),
            doctor_specialist: cell(specialist_idx),
            diet_recommendations: cell(recommendations_idx),
            foods_to_avoid: cell(avoid_idx),
            diet_routine: cell(routine_idx),
        };
        entries.push(raw.into());
    }
    debug!(rows = entries.len(), "parsed csv records");
    Ok(entries)
}

fn read_parquet(file: File, symptom_column: &str) -> Result<Vec<ConditionEntry>, CatalogueError> {
    let df = ParquetReader::new(file).finish()?;
    if df.column(symptom_column).is_err() {
        return Err(CatalogueError::MissingColumn {
            column: symptom_column.to_string(),
        });
    }

    let symptoms = string_column(&df, symptom_column)?;
    let conditions = string_column(&df, CONDITION_COLUMN)?;
    let specialists = string_column(&df, SPECIALIST_COLUMN)?;
    let recommendations = string_column(&df, DIET_RECOMMENDATIONS_COLUMN)?;
    let avoid = string_column(&df, FOODS_TO_AVOID_COLUMN)?;
    let routines = string_column(&df, DIET_ROUTINE_COLUMN)?;

    let at = |column: &Vec<Option<String>>, idx: usize| column.get(idx).cloned().flatten();
    let entries: Vec<ConditionEntry> = (0..df.height())
        .map(|idx| {
            RawConditionRow {
                symptoms: at(&symptoms, idx),
                health_condition: at(&conditions, idx),
                doctor_specialist: at(&specialists, idx),
                diet_recommendations: at(&recommendations, idx),
                foods_to_avoid: at(&avoid, idx),
                diet_routine: at(&routines, idx),
            }
            .into()
        })
        .collect();
    Ok(entries)
}

/// Read the first worksheet; its first row holds the column names.
fn read_spreadsheet(
    path: &Path,
    symptom_column: &str,
) -> Result<Vec<ConditionEntry>, CatalogueError> {
    let bytes = std::fs::read(path).map_err(|source| CatalogueError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => {
            return Err(CatalogueError::MissingColumn {
                column: symptom_column.to_string(),
            })
        }
    };

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect())
        .unwrap_or_default();
    let find = |name: &str| headers.iter().position(|h| h == name);

    let symptoms_idx = find(symptom_column).ok_or_else(|| CatalogueError::MissingColumn {
        column: symptom_column.to_string(),
    })?;
    let condition_idx = find(CONDITION_COLUMN);
    let specialist_idx = find(SPECIALIST_COLUMN);
    let recommendations_idx = find(DIET_RECOMMENDATIONS_COLUMN);
    let avoid_idx = find(FOODS_TO_AVOID_COLUMN);
    let routine_idx = find(DIET_ROUTINE_COLUMN);

    let entries: Vec<ConditionEntry> = rows
        .map(|row| {
            let cell = |idx: Option<usize>| {
                idx.and_then(|i| row.get(i))
                    .filter(|value| !matches!(value, Data::Empty))
                    .map(|value| value.to_string())
                    .filter(|value| !value.is_empty())
            };
            RawConditionRow {
                symptoms: cell(Some(symptoms_idx)),
                health_condition: cell(condition_idx),
                doctor_specialist: cell(specialist_idx),
                diet_recommendations: cell(recommendations_idx),
                foods_to_avoid: cell(avoid_idx),
                diet_routine: cell(routine_idx),
            }
            .into()
        })
        .collect();
    debug!(rows = entries.len(), "parsed worksheet rows");
    Ok(entries)
}

/// Column cast to strings; an absent column reads as all-null.
fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, CatalogueError> {
    let Ok(series) = df.column(name) else {
        return Ok(Vec::new());
    };
    let cast = series.cast(&DataType::String)?;
    let values = cast
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_follow_extension() {
        assert_eq!(
            detect_format(Path::new("health_conditions_dataset.xlsx")),
            DatasetFormat::Spreadsheet
        );
        assert_eq!(detect_format(Path::new("conditions.ods")), DatasetFormat::Spreadsheet);
        assert_eq!(detect_format(Path::new("conditions.PARQUET")), DatasetFormat::Parquet);
        assert_eq!(detect_format(Path::new("conditions.txt")), DatasetFormat::Csv);
    }

    #[test]
    fn csv_rows_coerce_missing_cells() {
        let data = "symptoms,health_condition,doctor_specialist\n\
                    fever and cough,Flu,General Physician\n\
                    ,Unknown,\n";
        let entries = read_csv(data.as_bytes(), "symptoms").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].health_condition, "Flu");
        assert_eq!(entries[0].diet_routine, "");
        assert_eq!(entries[1].symptoms, "");
        assert_eq!(entries[1].doctor_specialist, "");
    }

    #[test]
    fn csv_without_symptom_column_fails() {
        let data = "condition,specialist\nFlu,GP\n";
        let err = read_csv(data.as_bytes(), "symptoms").unwrap_err();
        assert!(matches!(err, CatalogueError::MissingColumn { column } if column == "symptoms"));
    }
}
