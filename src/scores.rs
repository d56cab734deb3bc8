//! The persisted list of final scores.
//!
//! Scores are kept in a plain text file holding one decimal integer per line,
//! in the order the games finished.  There is no header.
use std::cmp::Reverse;
use std::io::{self, Write};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub(crate) fn new(path: PathBuf) -> ScoreStore {
        ScoreStore { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Delete all recorded scores.  It is not an error if there are none.
    pub(crate) fn clear(&self) -> Result<(), SaveError> {
        match fs_err::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SaveError::clear(e)),
        }
    }

    /// Record a final score.  The record is flushed to disk before this
    /// returns.
    pub(crate) fn append(&self, score: u32) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut fp = fs_err::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(SaveError::open)?;
        // A single write so that a record is never split across calls
        fp.write_all(format!("{score}\n").as_bytes())
            .map_err(SaveError::write)?;
        fp.sync_all().map_err(SaveError::write)?;
        Ok(())
    }

    /// Read back every recorded score in the order recorded.  A malformed
    /// line fails the whole read.
    pub(crate) fn load_all(&self) -> Result<Vec<u32>, LoadError> {
        let src = match fs_err::read_to_string(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LoadError::read(e)),
        };
        src.lines()
            .enumerate()
            .map(|(i, ln)| {
                ln.parse::<u32>()
                    .map_err(|e| LoadError::parse(i + 1, ln, e))
            })
            .collect()
    }

    /// Read back every recorded score, highest first.  Equal scores stay in
    /// the order recorded.
    pub(crate) fn ranked_descending(&self) -> Result<Vec<u32>, LoadError> {
        let mut scores = self.load_all()?;
        scores.sort_by_key(|&s| Reverse(s));
        Ok(scores)
    }
}

#[derive(Debug, Error)]
#[error("Failed to save score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn open(e: io::Error) -> Self {
        SaveError(SaveErrorSource::Open(e))
    }

    fn write(e: io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }

    fn clear(e: io::Error) -> Self {
        SaveError(SaveErrorSource::Clear(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] io::Error),
    #[error("failed to open scores file")]
    Open(#[source] io::Error),
    #[error("failed to write scores file")]
    Write(#[source] io::Error),
    #[error("failed to delete scores file")]
    Clear(#[source] io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read scores from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn parse(line: usize, value: &str, source: ParseIntError) -> Self {
        LoadError(LoadErrorSource::Parse {
            line,
            value: value.to_owned(),
            source,
        })
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read scores file")]
    Read(#[source] io::Error),
    #[error("invalid score {value:?} on line {line}")]
    Parse {
        line: usize,
        value: String,
        source: ParseIntError,
    },
}
