// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log for durable storage
//!
//! One JSON entry per line, each carrying a sequence number and a CRC32 of
//! its serialized operation. A final line without its newline is a torn write
//! from a crash and is cut off when the log is reopened; any other bad line
//! stops replay with an error.
//!
//! An append that fails is cut back off the file before the error is
//! returned. If that cut fails too, the log refuses further appends.

use rp_core::Operation;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur in WAL operations
#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupted entry at line {line}: {reason}")]
    Corrupted { line: u64, reason: String },
    #[error("checksum mismatch at line {line}")]
    ChecksumMismatch { line: u64 },
    #[error("log is unusable after a failed write could not be rolled back")]
    Poisoned,
}

/// Write-ahead log for durable operation storage
pub struct Wal {
    file: File,
    sequence: u64,
    poisoned: bool,
}

impl Wal {
    /// Open or create a WAL at the given path, returning the log positioned
    /// after its last entry together with every operation already in it
    pub fn open(path: &Path) -> Result<(Self, Vec<Operation>), WalError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path)?;

        let scan = scan(&fs::read_to_string(path)?)?;
        if let Some(valid_len) = scan.torn_at {
            file.set_len(valid_len)?;
            file.sync_all()?;
        }

        let sequence = scan.ops.len() as u64;
        Ok((
            Self {
                file,
                sequence,
                poisoned: false,
            },
            scan.ops,
        ))
    }

    /// Append an operation to the log
    pub fn append(&mut self, op: &Operation) -> Result<u64, WalError> {
        self.append_with(op, |file, line| {
            writeln!(file, "{}", line)?;
            file.sync_all()
        })
    }

    fn append_with(
        &mut self,
        op: &Operation,
        write: impl FnOnce(&mut File, &str) -> io::Result<()>,
    ) -> Result<u64, WalError> {
        if self.poisoned {
            return Err(WalError::Poisoned);
        }
        let entry = WalEntry::new(self.sequence + 1, op.clone())?;
        let line = serde_json::to_string(&entry)?;
        let committed_len = self.file.metadata()?.len();

        if let Err(e) = write(&mut self.file, &line) {
            if let Err(cut) = self.rollback(committed_len) {
                tracing::error!(error = %cut, seq = entry.seq, "wal rollback failed");
                self.poisoned = true;
                return Err(WalError::Poisoned);
            }
            tracing::warn!(error = %e, seq = entry.seq, "wal append rolled back");
            return Err(e.into());
        }
        self.sequence = entry.seq;
        Ok(self.sequence)
    }

    fn rollback(&mut self, len: u64) -> io::Result<()> {
        self.file.set_len(len)?;
        self.file.sync_all()
    }

    /// Get the current sequence number
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Replay all operations from the log without opening it for writing
    pub fn replay(path: &Path) -> Result<Vec<Operation>, WalError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(scan(&text)?.ops)
    }
}

struct Scan {
    ops: Vec<Operation>,
    /// Byte length of the intact prefix when the last line was torn
    torn_at: Option<u64>,
}

fn scan(text: &str) -> Result<Scan, WalError> {
    let mut ops = Vec::new();
    let mut offset = 0usize;
    let mut line_no = 0u64;
    let mut rest = text;

    while !rest.is_empty() {
        line_no += 1;
        let Some(end) = rest.find('\n') else {
            return Ok(Scan {
                ops,
                torn_at: Some(offset as u64),
            });
        };
        let line = &rest[..end];
        offset += end + 1;
        rest = &rest[end + 1..];

        if line.trim().is_empty() {
            continue;
        }
        let entry: WalEntry = serde_json::from_str(line).map_err(|e| WalError::Corrupted {
            line: line_no,
            reason: e.to_string(),
        })?;
        if entry.seq != ops.len() as u64 + 1 {
            return Err(WalError::Corrupted {
                line: line_no,
                reason: format!("expected sequence {}, found {}", ops.len() + 1, entry.seq),
            });
        }
        if !entry.verify()? {
            return Err(WalError::ChecksumMismatch { line: line_no });
        }
        ops.push(entry.op);
    }

    Ok(Scan { ops, torn_at: None })
}

#[derive(Debug, Serialize, Deserialize)]
struct WalEntry {
    seq: u64,
    op: Operation,
    crc: u32,
}

impl WalEntry {
    fn new(seq: u64, op: Operation) -> Result<Self, WalError> {
        let crc = checksum(&op)?;
        Ok(Self { seq, op, crc })
    }

    fn verify(&self) -> Result<bool, WalError> {
        Ok(self.crc == checksum(&self.op)?)
    }
}

fn checksum(op: &Operation) -> Result<u32, WalError> {
    let json = serde_json::to_string(op)?;
    Ok(crc32fast::hash(json.as_bytes()))
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
