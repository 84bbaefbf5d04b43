//! Append-only `.jsonl` event log that survives a crash mid-run.
//!
//! Line 1 is a header (`format_version`, `build_id`, `config_hash`, `seed`).
//! Every following line is one handled [`WorldEvent`] chained to its
//! predecessor by SHA-256, so a truncated, edited or reordered file is
//! rejected at the first bad line instead of replaying into a different run.

use std::error::Error;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::journal::{EventJournal, EventRecord};
use crate::world::WorldEvent;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct FileHeader {
    format_version: u16,
    build_id: String,
    config_hash: u64,
    seed: u64,
}

/// Hash input for one record; `prev_sha256_hex` is appended after it.
#[derive(Serialize)]
struct ChainedBody<'a> {
    seq: u64,
    tick: u64,
    event: &'a WorldEvent,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    seq: u64,
    tick: u64,
    event: WorldEvent,
    prev_sha256_hex: String,
    sha256_hex: String,
}

/// Previous-hash value for the first record in a chain.
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

fn chain_hash(body_json: &str, prev_sha256_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    hasher.update(prev_sha256_hex.as_bytes());
    format!("{:064x}", hasher.finalize())
}

pub struct JournalWriter {
    writer: BufWriter<File>,
    last_sha256_hex: String,
    next_seq: u64,
}

impl JournalWriter {
    /// Creates (or truncates) the file and writes the header line.
    pub fn create(path: &Path, journal: &EventJournal) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        let header = FileHeader {
            format_version: journal.format_version,
            build_id: journal.build_id.clone(),
            config_hash: journal.config_hash,
            seed: journal.seed,
        };
        writeln!(writer, "{}", serde_json::to_string(&header).map_err(io::Error::other)?)?;
        writer.flush()?;
        Ok(Self { writer, last_sha256_hex: GENESIS_HASH.to_string(), next_seq: 0 })
    }

    /// Continues an existing chain; the arguments come from [`LoadedJournal`].
    pub fn resume(path: &Path, last_sha256_hex: String, next_seq: u64) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        Ok(Self { writer: BufWriter::new(file), last_sha256_hex, next_seq })
    }

    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Writes one record and flushes before returning.
    pub fn append(&mut self, tick: u64, event: &WorldEvent) -> io::Result<u64> {
        let seq = self.next_seq;
        let body_json =
            serde_json::to_string(&ChainedBody { seq, tick, event }).map_err(io::Error::other)?;
        let sha256_hex = chain_hash(&body_json, &self.last_sha256_hex);
        let record = FileRecord {
            seq,
            tick,
            event: event.clone(),
            prev_sha256_hex: self.last_sha256_hex.clone(),
            sha256_hex: sha256_hex.clone(),
        };
        writeln!(self.writer, "{}", serde_json::to_string(&record).map_err(io::Error::other)?)?;
        self.writer.flush()?;

        self.last_sha256_hex = sha256_hex;
        self.next_seq += 1;
        Ok(seq)
    }

    /// Writes every record of an in-memory journal.
    pub fn append_all(&mut self, journal: &EventJournal) -> io::Result<()> {
        for record in &journal.records {
            self.append(record.tick, &record.event)?;
        }
        Ok(())
    }
}

/// Saves a whole journal in one go.
pub fn save_journal_to_file(path: &Path, journal: &EventJournal) -> io::Result<()> {
    let mut writer = JournalWriter::create(path, journal)?;
    writer.append_all(journal)
}

#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: EventJournal,
    pub last_sha256_hex: String,
    pub next_seq: u64,
}

#[derive(Debug)]
pub enum JournalLoadError {
    Io(io::Error),
    EmptyFile,
    InvalidHeader { line: usize, message: String },
    InvalidRecord { line: usize, message: String },
    /// The last line has no trailing newline (a write was cut short).
    IncompleteLine { line: usize },
    HashChainBroken { line: usize },
}

impl fmt::Display for JournalLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "journal I/O error: {e}"),
            Self::EmptyFile => write!(f, "journal file is empty"),
            Self::InvalidHeader { line, message } => {
                write!(f, "invalid journal header at line {line}: {message}")
            }
            Self::InvalidRecord { line, message } => {
                write!(f, "invalid journal record at line {line}: {message}")
            }
            Self::IncompleteLine { line } => write!(f, "incomplete journal line at line {line}"),
            Self::HashChainBroken { line } => write!(f, "SHA-256 hash chain broken at line {line}"),
        }
    }
}

impl Error for JournalLoadError {}

/// Loads and verifies a journal file, stopping at the first bad line.
pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let content = fs::read_to_string(path).map_err(JournalLoadError::Io)?;
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(JournalLoadError::EmptyFile);
    }
    if !content.ends_with('\n') {
        return Err(JournalLoadError::IncompleteLine { line: lines.len() });
    }

    let header: FileHeader = serde_json::from_str(lines[0])
        .map_err(|e| JournalLoadError::InvalidHeader { line: 1, message: e.to_string() })?;
    let mut journal = EventJournal {
        format_version: header.format_version,
        build_id: header.build_id,
        config_hash: header.config_hash,
        seed: header.seed,
        records: Vec::new(),
    };

    let mut prev_sha256_hex = GENESIS_HASH.to_string();
    let mut next_seq: u64 = 0;
    for (index, line) in lines.iter().enumerate().skip(1) {
        let line_number = index + 1;
        let invalid = |message: String| JournalLoadError::InvalidRecord { line: line_number, message };

        if line.is_empty() {
            return Err(invalid("empty line".to_string()));
        }
        let record: FileRecord = serde_json::from_str(line).map_err(|e| invalid(e.to_string()))?;
        if record.seq != next_seq {
            return Err(invalid(format!("expected seq {next_seq}, found {}", record.seq)));
        }
        if record.prev_sha256_hex != prev_sha256_hex {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }
        let body = ChainedBody { seq: record.seq, tick: record.tick, event: &record.event };
        let body_json = serde_json::to_string(&body).map_err(|e| invalid(e.to_string()))?;
        if record.sha256_hex != chain_hash(&body_json, &prev_sha256_hex) {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }

        journal.records.push(EventRecord { seq: record.seq, tick: record.tick, event: record.event });
        prev_sha256_hex = record.sha256_hex;
        next_seq += 1;
    }

    Ok(LoadedJournal { journal, last_sha256_hex: prev_sha256_hex, next_seq })
}

#[cfg(test)]
mod tests;
