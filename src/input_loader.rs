use std::fs::File;
use std::path::Path;
use log::{info, warn};
use crate::record_log::LogError;

/// True when the positional target names a previously written record log.
pub fn is_record_log<P: AsRef<Path>>(target: P) -> bool {
    target
        .as_ref()
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Reads the `name` column back out of a record log.
///
/// The first row is treated as a header. Rows with an empty or missing name
/// are skipped, as are rows the CSV reader cannot decode.
pub fn load_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>, LogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LogError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut names = Vec::new();
    for (line, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                if let Some(name) = record.get(2).map(str::trim).filter(|n| !n.is_empty()) {
                    names.push(name.to_string());
                }
            }
            Err(e) => warn!("Skipping unreadable row {} in {:?}: {}", line + 2, path, e),
        }
    }

    info!("Loaded {} names from {:?}", names.len(), path);
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_detects_csv_targets() {
        assert!(is_record_log("names.csv"));
        assert!(is_record_log("out/NAMES.CSV"));
        assert!(!is_record_log("Acme Corp"));
        assert!(!is_record_log("acme.csv.txt"));
    }

    #[test]
    fn test_reads_name_column_skipping_header() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#""timestamp","engine","name","title","url","text""#).unwrap();
        writeln!(file, r#""01-02-2024 10:11:12","google","jane doe","CTO","https://www.linkedin.com/in/jane","Jane Doe - CTO""#).unwrap();
        writeln!(file, r#""01-02-2024 10:11:12","bing","","N/A","https://www.linkedin.com/in/x","""#).unwrap();
        writeln!(file, r#""01-02-2024 10:11:12","bing"," john roe ","N/A","https://www.linkedin.com/in/john","John Roe""#).unwrap();

        let names = load_names(file.path()).unwrap();
        assert_eq!(names, vec!["jane doe", "john roe"]);
    }

    #[test]
    fn test_tolerates_short_rows() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timestamp,engine,name").unwrap();
        writeln!(file, "x,google").unwrap();
        writeln!(file, "x,google,jane doe,CTO").unwrap();

        assert_eq!(load_names(file.path()).unwrap(), vec!["jane doe"]);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_names("/nonexistent/names.csv").is_err());
    }
}
