//! Flat-file record storage for chessdesk.
//!
//! Each record kind lives in its own text file under a data directory. Files
//! are only ever appended to: one record per line, fields joined with a
//! comma, no header and no escaping. Reads are full linear scans.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::record::{join_fields, split_fields};

/// Append-only store of delimited text records.
///
/// A store is rooted at a directory; the `store_name` passed to each
/// operation is a file name inside that directory.
#[derive(Debug, Clone)]
pub struct FlatRecordStore {
    /// Directory holding the record files.
    root: PathBuf,
    /// Create the directory on first append if it is missing.
    create_root: bool,
}

impl FlatRecordStore {
    /// Open a store rooted at `root`.
    ///
    /// Nothing is touched on disk until the first append.
    #[must_use]
    pub fn open(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            create_root: true,
        }
    }

    /// Control whether a missing data directory is created on append.
    #[must_use]
    pub fn with_create_root(mut self, create_root: bool) -> Self {
        self.create_root = create_root;
        self
    }

    /// Get the data directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `store_name`.
    #[must_use]
    pub fn path_for(&self, store_name: &str) -> PathBuf {
        self.root.join(store_name)
    }

    /// Append one record, joining `fields` with the delimiter.
    ///
    /// Fields are not validated or escaped here.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn append<S: AsRef<str>>(&self, store_name: &str, fields: &[S]) -> Result<()> {
        self.append_line(store_name, &join_fields(fields))
    }

    /// Append a pre-rendered line to `store_name`, creating the file if absent.
    ///
    /// The line and its newline go out in a single write, so a failed open
    /// leaves the file untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created, opened or
    /// written.
    pub fn append_line(&self, store_name: &str, line: &str) -> Result<()> {
        self.ensure_root()?;

        let path = self.path_for(store_name);
        debug!("Appending record to {}", path.display());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| {
                error!("Cannot open {} for append: {}", path.display(), source);
                Error::StoreOpen {
                    path: path.clone(),
                    source,
                }
            })?;

        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        file.write_all(buf.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| {
                error!("Cannot write to {}: {}", path.display(), source);
                Error::StoreWrite {
                    path: path.clone(),
                    source,
                }
            })?;

        info!("Appended record to {}", store_name);
        Ok(())
    }

    /// Return the first record whose fields satisfy `predicate`.
    ///
    /// Lines are split on the delimiter and tested in file order, which is
    /// append order. A missing file is the same as an empty one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be opened or read.
    pub fn find_match<F>(&self, store_name: &str, mut predicate: F) -> Result<Option<Vec<String>>>
    where
        F: FnMut(&[String]) -> bool,
    {
        let Some(reader) = self.reader(store_name)? else {
            return Ok(None);
        };
        let path = self.path_for(store_name);

        for line in reader.lines() {
            let line = line.map_err(|source| read_error(&path, source))?;
            let fields = split_fields(&line);
            if predicate(&fields) {
                debug!("Matched record in {}", store_name);
                return Ok(Some(fields));
            }
        }

        debug!("No matching record in {}", store_name);
        Ok(None)
    }

    /// Read every line of `store_name`, in append order.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be opened or read.
    pub fn read_lines(&self, store_name: &str) -> Result<Vec<String>> {
        let Some(reader) = self.reader(store_name)? else {
            return Ok(Vec::new());
        };
        let path = self.path_for(store_name);

        reader
            .lines()
            .map(|line| line.map_err(|source| read_error(&path, source)))
            .collect()
    }

    /// Read every record of `store_name`, split on the delimiter.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be opened or read.
    pub fn read_all(&self, store_name: &str) -> Result<Vec<Vec<String>>> {
        Ok(self
            .read_lines(store_name)?
            .iter()
            .map(|line| split_fields(line))
            .collect())
    }

    /// Count the records in `store_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be opened or read.
    pub fn count(&self, store_name: &str) -> Result<usize> {
        Ok(self.read_lines(store_name)?.len())
    }

    /// Get statistics for `store_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn stats(&self, store_name: &str) -> Result<StoreStats> {
        let path = self.path_for(store_name);
        let records = self.count(store_name)?;

        let (size_bytes, modified) = match fs::metadata(&path) {
            Ok(meta) => (
                meta.len(),
                meta.modified().ok().map(DateTime::<Utc>::from),
            ),
            Err(_) => (0, None),
        };

        Ok(StoreStats {
            store_name: store_name.to_string(),
            path,
            records,
            size_bytes,
            modified,
        })
    }

    /// Open `store_name` for reading, or `None` if it doesn't exist yet.
    fn reader(&self, store_name: &str) -> Result<Option<BufReader<File>>> {
        let path = self.path_for(store_name);
        match File::open(&path) {
            Ok(file) => Ok(Some(BufReader::new(file))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Record store {} does not exist yet", path.display());
                Ok(None)
            }
            Err(source) => {
                error!("Cannot open {}: {}", path.display(), source);
                Err(Error::StoreOpen { path, source })
            }
        }
    }

    fn ensure_root(&self) -> Result<()> {
        if self.create_root && !self.root.as_os_str().is_empty() && !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|source| {
                error!("Cannot create {}: {}", self.root.display(), source);
                Error::DirectoryCreate {
                    path: self.root.clone(),
                    source,
                }
            })?;
            info!("Created data directory {}", self.root.display());
        }
        Ok(())
    }
}

fn read_error(path: &Path, source: std::io::Error) -> Error {
    error!("Cannot read {}: {}", path.display(), source);
    Error::StoreRead {
        path: path.to_path_buf(),
        source,
    }
}

/// Statistics about one record file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// File name within the data directory.
    pub store_name: String,
    /// Full path of the file.
    pub path: PathBuf,
    /// Number of lines in the file.
    pub records: usize,
    /// Size of the file in bytes.
    pub size_bytes: u64,
    /// Last modification time, if the file exists.
    pub modified: Option<DateTime<Utc>>,
}
