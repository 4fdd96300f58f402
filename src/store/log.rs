//! Flat-file meal log.
//!
//! The log is a two-column CSV (`start_time,end_time`). Reads parse every
//! row leniently. Mutations work on the raw text lines: a start appends one
//! line, an end or an undo rewrites or drops the last line, and every other
//! line is written back byte for byte.

use crate::core::backup;
use crate::errors::{AppError, AppResult};
use crate::models::meal::MealRecord;
use crate::utils::path::with_suffix;
use crate::utils::time::{format_timestamp, parse_optional_timestamp, parse_timestamp};
use chrono::NaiveDateTime;
use csv::StringRecord;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, warn};

pub const HEADER: [&str; 2] = ["start_time", "end_time"];

/// What a single undo step reverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UndoOutcome {
    /// The last meal had an end time; it is in progress again.
    EndCleared,
    /// The last meal was in progress; it is gone.
    Removed,
}

/// Result of `set_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOutcome {
    /// The last meal now ends at the given time.
    Ended(MealRecord),
    /// The end was written, but the last row's start is not a timestamp.
    EndedUnreadable,
    /// The log holds no row.
    Empty,
}

pub struct LogStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LogStore {
    /// Open the log at `path`, creating it with a header when missing.
    ///
    /// A failed creation is logged, not returned: reads then yield no data
    /// and the next mutation reports the underlying I/O error.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            match replace_file(&path, &header_line()) {
                Ok(()) => debug!(path = %path.display(), "created meal log"),
                Err(e) => error!(path = %path.display(), "failed to create meal log: {e}"),
            }
        }
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All readable records, oldest first.
    pub fn read_all(&self) -> AppResult<Vec<MealRecord>> {
        let _guard = self.guard();
        read_records(&self.path)
    }

    /// All readable records, newest first.
    pub fn read_newest_first(&self) -> AppResult<Vec<MealRecord>> {
        let mut records = self.read_all()?;
        records.reverse();
        Ok(records)
    }

    /// Append a new in-progress meal starting at `ts`.
    pub fn append_start(&self, ts: NaiveDateTime) -> AppResult<MealRecord> {
        self.mutate(|lines| {
            lines.push(&[format_timestamp(&ts), String::new()])?;
            Ok(MealRecord::started(ts))
        })
    }

    /// Set (or overwrite) the end time of the last row.
    pub fn set_end(&self, ts: NaiveDateTime) -> AppResult<EndOutcome> {
        self.mutate(|lines| {
            let Some(mut fields) = lines.last_fields()? else {
                return Ok(EndOutcome::Empty);
            };
            set_field(&mut fields, 1, format_timestamp(&ts));
            lines.replace_last(&fields)?;

            Ok(match parse_timestamp(&fields[0]) {
                Ok(start_time) => EndOutcome::Ended(MealRecord {
                    start_time,
                    end_time: Some(ts),
                }),
                Err(e) => {
                    warn!("ended a meal log row with an unreadable start: {e}");
                    EndOutcome::EndedUnreadable
                }
            })
        })
    }

    /// Revert the most recent start or end, judged on the last row only.
    pub fn undo_last(&self) -> AppResult<UndoOutcome> {
        self.mutate(|lines| {
            let mut fields = lines.last_fields()?.ok_or(AppError::EmptyLog)?;
            let has_end = fields.get(1).is_some_and(|end| !end.trim().is_empty());
            if has_end {
                set_field(&mut fields, 1, String::new());
                lines.replace_last(&fields)?;
                Ok(UndoOutcome::EndCleared)
            } else {
                lines.pop();
                Ok(UndoOutcome::Removed)
            }
        })
    }

    /// Rotate backups, load the text, apply `op`, and write back only if
    /// `op` succeeded. The whole sequence holds the store lock.
    fn mutate<T, F>(&self, op: F) -> AppResult<T>
    where
        F: FnOnce(&mut LogLines) -> AppResult<T>,
    {
        let _guard = self.guard();

        if let Err(e) = backup::rotate(&self.path) {
            warn!(path = %self.path.display(), "backup rotation failed: {e}");
        }

        let mut lines = LogLines::load(&self.path)?;
        let out = op(&mut lines)?;
        replace_file(&self.path, &lines.render())?;
        Ok(out)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`: a panic elsewhere cannot leave it torn.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// The log as text: the header line, then one entry per data line with its
/// line terminator kept.
struct LogLines {
    header: String,
    rows: Vec<String>,
}

impl LogLines {
    fn load(path: &Path) -> AppResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        let mut lines = text.split_inclusive('\n').map(str::to_string);
        let header = lines.next().unwrap_or_else(header_line);
        let mut rows: Vec<String> = lines.collect();

        // Blank lines at the end are not rows.
        while rows.last().is_some_and(|l| l.trim().is_empty()) {
            rows.pop();
        }

        Ok(Self { header, rows })
    }

    /// Fields of the last row, `None` when there is no row.
    fn last_fields(&self) -> AppResult<Option<Vec<String>>> {
        let Some(line) = self.rows.last() else {
            return Ok(None);
        };

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(line.trim().as_bytes());
        let mut record = StringRecord::new();
        rdr.read_record(&mut record)?;

        Ok(Some(record.iter().map(str::to_string).collect()))
    }

    fn push(&mut self, fields: &[String]) -> AppResult<()> {
        if !self.header.ends_with('\n') {
            self.header.push('\n');
        }
        if let Some(last) = self.rows.last_mut() {
            if !last.ends_with('\n') {
                last.push('\n');
            }
        }
        self.rows.push(encode_line(fields)?);
        Ok(())
    }

    /// Swap the last row for `fields`, keeping its line terminator.
    fn replace_last(&mut self, fields: &[String]) -> AppResult<()> {
        let encoded = encode_line(fields)?;
        if let Some(last) = self.rows.last_mut() {
            let body = encoded.trim_end_matches('\n');
            let ending = if last.ends_with("\r\n") { "\r\n" } else { "\n" };
            *last = format!("{body}{ending}");
        }
        Ok(())
    }

    fn pop(&mut self) {
        self.rows.pop();
    }

    fn render(&self) -> String {
        let mut out = self.header.clone();
        for row in &self.rows {
            out.push_str(row);
        }
        out
    }
}

fn header_line() -> String {
    format!("{}\n", HEADER.join(","))
}

fn set_field(fields: &mut Vec<String>, index: usize, value: String) {
    if fields.len() <= index {
        fields.resize(index + 1, String::new());
    }
    fields[index] = value;
}

/// One CSV line, `\n`-terminated.
fn encode_line(fields: &[String]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(fields)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Other(format!("csv buffer: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Other(format!("csv buffer: {e}")))
}

/// Parse the log file. A missing file is an empty log.
pub fn read_records(path: &Path) -> AppResult<Vec<MealRecord>> {
    let file = match fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    parse_records(file)
}

pub fn parse_records<R: io::Read>(input: R) -> AppResult<Vec<MealRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut records = Vec::new();
    for (line, row) in rdr.records().enumerate() {
        let row = row?;
        let start = match row.get(0) {
            Some(s) if !s.is_empty() => s,
            _ => continue,
        };
        let start_time = match parse_timestamp(start) {
            Ok(ts) => ts,
            Err(e) => {
                // +2: header line and 1-based numbering
                warn!(line = line + 2, "skipping meal log row: {e}");
                continue;
            }
        };
        records.push(MealRecord {
            start_time,
            end_time: parse_optional_timestamp(row.get(1)),
        });
    }

    Ok(records)
}

/// Replace `path` with `content` via a sibling `.tmp` file. The temp file
/// is removed when the write or the rename fails.
pub fn replace_file(path: &Path, content: &str) -> io::Result<()> {
    let tmp = with_suffix(path, ".tmp");
    let result = fs::write(&tmp, content).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        fs::remove_file(&tmp).ok();
    }
    result
}
