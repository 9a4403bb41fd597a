use std::fs::{self, File};
use std::path::Path;

use log::{debug, info};
use polars::prelude::*;
use polars_io::parquet::ParquetWriter;

use crate::error::{PreprocessError, Result};
use crate::records::{RAW_SCHEMA, REQUIRED_COLUMNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFormat {
    Csv,
    Parquet,
}

impl WriteFormat {
    /// Parquet for a `.parquet` extension, CSV otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => WriteFormat::Parquet,
            _ => WriteFormat::Csv,
        }
    }
}

/// Report every required column absent from `columns`.
pub fn check_columns<'a, I>(columns: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = columns.into_iter().collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !present.contains(*name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PreprocessError::MissingColumns { columns: missing })
    }
}

fn check_header(path: &Path) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?;
    check_columns(headers.iter())
}

/// Load a raw stroke CSV. bmi is kept as text; "N/A" becomes null later.
pub async fn read_csv<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let path = path.as_ref();
    check_header(path)?;

    let file = File::open(path)?;
    let df = CsvReader::new(file)
        .has_header(true)
        .with_dtypes(Some(RAW_SCHEMA.clone()))
        .finish()?;

    info!("loaded {} rows x {} columns from {}", df.height(), df.width(), path.display());
    Ok(df)
}

/// Write `df` to `path`, creating missing parent directories.
pub async fn write_table<P: AsRef<Path>>(path: P, df: &mut DataFrame) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("creating directory {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(path)?;
    match WriteFormat::from_path(path) {
        WriteFormat::Csv => {
            CsvWriter::new(&mut file).has_header(true).finish(df)?;
        }
        WriteFormat::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
    }

    info!("wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars_io::parquet::ParquetReader;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    const HEADER: &str = "id,gender,age,hypertension,heart_disease,ever_married,work_type,Residence_type,avg_glucose_level,bmi,smoking_status,stroke";

    #[test]
    fn test_write_format_from_path() {
        assert_eq!(WriteFormat::from_path(Path::new("out/clean.parquet")), WriteFormat::Parquet);
        assert_eq!(WriteFormat::from_path(Path::new("out/clean.PARQUET")), WriteFormat::Parquet);
        assert_eq!(WriteFormat::from_path(Path::new("out/clean.csv")), WriteFormat::Csv);
        assert_eq!(WriteFormat::from_path(Path::new("out/clean")), WriteFormat::Csv);
    }

    #[tokio::test]
    async fn test_read_csv_keeps_bmi_marker() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "9046,Male,67,0,1,Yes,Private,Urban,228.69,36.6,formerly smoked,1").unwrap();
        writeln!(file, "51676,Female,61,0,0,Yes,Self-employed,Rural,202.21,N/A,never smoked,1").unwrap();
        file.flush().unwrap();

        let df = read_csv(file.path()).await.unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 12);
        assert_eq!(df.column("bmi").unwrap().dtype(), &DataType::Utf8);
        assert_eq!(df.column("age").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("id").unwrap().dtype(), &DataType::Int32);
    }

    #[tokio::test]
    async fn test_read_csv_missing_columns() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,gender,age").unwrap();
        writeln!(file, "1,Male,30").unwrap();
        file.flush().unwrap();

        match read_csv(file.path()).await {
            Err(PreprocessError::MissingColumns { columns }) => {
                assert_eq!(columns.len(), 9);
                assert!(columns.contains(&"bmi".to_string()));
                assert!(columns.contains(&"stroke".to_string()));
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_read_csv_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_csv(dir.path().join("absent.csv")).await.unwrap_err();
        assert!(matches!(err, PreprocessError::Io(_)));
    }

    #[tokio::test]
    async fn test_write_table_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("clean.csv");
        let mut df = polars::df!(
            "age" => &[0.5, -0.5],
            "stroke" => &[1i32, 0]
        )
        .unwrap();

        write_table(&path, &mut df).await.unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "age,stroke");
        assert_eq!(lines.len(), 3);
    }

    #[tokio::test]
    async fn test_write_table_parquet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clean.parquet");
        let mut df = polars::df!("bmi" => &[0.1, 0.2, 0.3]).unwrap();

        write_table(&path, &mut df).await.unwrap();

        let back = ParquetReader::new(File::open(&path).unwrap()).finish().unwrap();
        assert!(back.frame_equal(&df));
    }
}
