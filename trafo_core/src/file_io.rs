//! # File I/O Module
//!
//! File operations around a design run:
//! - **Config files**: `DesignConfig` as JSON
//! - **Atomic saves**: write to `.tmp`, fsync, rename, so a JSON report or
//!   config is never left half-written
//! - **Run log**: an append-only text log held under an exclusive advisory
//!   lock for the duration of a run
//!
//! ## Example
//!
//! ```rust,no_run
//! use trafo_core::file_io::{load_config, LogFile};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("trafo.json"))?;
//! let log = LogFile::open(Path::new("resultados_trafo_trifasico.log"))?;
//! // ... run the design, write through log.writer() ...
//! drop(log); // releases the lock
//! # Ok::<(), trafo_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::Serialize;

use crate::config::DesignConfig;
use crate::errors::{CalcError, CalcResult};
use crate::report::DesignReport;

/// Default name of the run log
pub const DEFAULT_LOG_FILE: &str = "resultados_trafo_trifasico.log";

/// Append-only run log, exclusively locked while open.
///
/// The lock is advisory (via fs2) and is released when the `LogFile` and
/// every writer cloned from it are dropped.
#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
    file: File,
}

impl LogFile {
    /// Open (or create) the log for appending and take the lock.
    ///
    /// # Returns
    ///
    /// * `Ok(LogFile)` - Lock acquired
    /// * `Err(CalcError::FileLocked)` - Another run holds the log
    pub fn open(path: &Path) -> CalcResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| CalcError::file_error("open log", path.display().to_string(), e.to_string()))?;

        file.try_lock_exclusive().map_err(|_| CalcError::FileLocked {
            path: path.display().to_string(),
        })?;

        Ok(LogFile {
            path: path.to_path_buf(),
            file,
        })
    }

    /// A second handle on the same open file, e.g. for a log subscriber.
    pub fn writer(&self) -> CalcResult<File> {
        self.file
            .try_clone()
            .map_err(|e| CalcError::file_error("clone log handle", self.path.display().to_string(), e.to_string()))
    }

    /// Append raw text and flush it to disk.
    pub fn append(&mut self, text: &str) -> CalcResult<()> {
        self.file
            .write_all(text.as_bytes())
            .and_then(|_| self.file.sync_data())
            .map_err(|e| CalcError::file_error("append log", self.path.display().to_string(), e.to_string()))
    }
}

/// Serialize `value` as pretty JSON and write it atomically.
///
/// 1. Write to a temporary file (`<path>.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename over the final path (atomic on most filesystems)
fn save_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Load a design configuration from a JSON file.
///
/// Missing fields take their defaults; invalid connection names and
/// malformed JSON are reported as `SerializationError`, an empty primary
/// tap list as `MissingField`.
pub fn load_config(path: &Path) -> CalcResult<DesignConfig> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let config: DesignConfig = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid config in {}: {}", path.display(), e)))?;

    config.validate()?;
    Ok(config)
}

/// Save a design configuration atomically.
pub fn save_config(config: &DesignConfig, path: &Path) -> CalcResult<()> {
    save_json_atomic(config, path)
}

/// Save a design report as JSON atomically.
pub fn save_report(report: &DesignReport, path: &Path) -> CalcResult<()> {
    save_json_atomic(report, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    use crate::calculations::design::calculate;
    use crate::tables::AwgTable;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("trafo_test_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(tmp_path_for(Path::new("/out/report.json")), Path::new("/out/report.json.tmp"));
    }

    #[test]
    fn test_config_roundtrip() {
        let path = temp_path("config.json");

        let mut config = DesignConfig::default();
        config.nameplate.rated_power_va = 75_000.0;
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.nameplate.rated_power_va, 75_000.0);
        assert_eq!(loaded, config);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_partial_config() {
        let path = temp_path("partial.json");
        fs::write(&path, r#"{ "nameplate": { "frequency_hz": 50.0 } }"#).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.nameplate.frequency_hz, 50.0);
        assert_eq!(loaded.nameplate.rated_power_va, 45_000.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_connection() {
        let path = temp_path("bad_connection.json");
        fs::write(
            &path,
            r#"{ "nameplate": { "secondary": { "line_voltage": 380.0, "connection": "zigzag" } } }"#,
        )
        .unwrap();

        let err = load_config(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(err.to_string().contains("zigzag"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(&temp_path("does_not_exist.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_atomic_report_save_creates_no_tmp_file() {
        let path = temp_path("report.json");
        let config = DesignConfig::default();
        let result = calculate(&config, AwgTable::standard()).unwrap();
        let report = DesignReport::new(&config, &result);

        save_report(&report, &path).unwrap();

        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains(&report.run_id.to_string()));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_log_appends() {
        let path = temp_path("append.log");
        let _ = fs::remove_file(&path);

        {
            let mut log = LogFile::open(&path).unwrap();
            log.append("first run\n").unwrap();
        }
        {
            let mut log = LogFile::open(&path).unwrap();
            log.append("second run\n").unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "first run\nsecond run\n");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_log_lock_contention() {
        let path = temp_path("locked.log");
        let _ = fs::remove_file(&path);

        let first = LogFile::open(&path).unwrap();
        let err = LogFile::open(&path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_LOCKED");

        drop(first);
        let second = LogFile::open(&path);
        assert!(second.is_ok());

        drop(second);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_log_writer_shares_file() {
        let path = temp_path("writer.log");
        let _ = fs::remove_file(&path);

        let log = LogFile::open(&path).unwrap();
        let mut writer = log.writer().unwrap();
        writer.write_all(b"via writer\n").unwrap();
        drop(writer);
        drop(log);

        assert_eq!(fs::read_to_string(&path).unwrap(), "via writer\n");
        let _ = fs::remove_file(&path);
    }
}
