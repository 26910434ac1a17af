// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, shutdown.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fs2::FileExt;
use rp_engine::{ConfigError, Engine, EngineConfig, EngineError};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::net::UnixListener;
use tokio::sync::Notify;
use tracing::{info, warn};

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory the daemon serves (holds the optional `rp.toml`)
    pub data_dir: PathBuf,
    /// Path to Unix socket
    pub socket_path: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to version file
    pub version_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    /// Path to the ledger WAL
    pub wal_path: PathBuf,
}

impl Config {
    /// Create config for a data directory
    pub fn for_data_dir(data_dir: &Path) -> Result<Self, LifecycleError> {
        Self::with_roots(data_dir, &state_dir()?, &socket_dir())
    }

    /// Config rooted at explicit state and socket directories
    pub fn with_roots(
        data_dir: &Path,
        state_root: &Path,
        socket_dir: &Path,
    ) -> Result<Self, LifecycleError> {
        let canonical = data_dir
            .canonicalize()
            .map_err(|e| LifecycleError::DataDirNotFound(data_dir.to_path_buf(), e))?;

        let hash = data_dir_hash(&canonical);
        let state_dir = state_root.join("ledgers").join(&hash);

        Ok(Self {
            data_dir: canonical,
            socket_path: socket_dir.join(format!("{}.sock", hash)),
            lock_path: state_dir.join("daemon.pid"),
            version_path: state_dir.join("daemon.version"),
            log_path: state_dir.join("daemon.log"),
            wal_path: state_dir.join("wal").join("ledger.wal"),
        })
    }
}

/// Daemon state during operation
pub struct DaemonState {
    /// Configuration
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Unix socket listener
    pub listener: UnixListener,
    /// Engine shared with every connection task
    pub engine: Arc<Engine>,
    /// Notified when a client requests shutdown
    pub shutdown: Arc<Notify>,
}

impl DaemonState {
    /// Shutdown the daemon gracefully
    ///
    /// Every committed operation is already synced to the WAL, so connection
    /// tasks still in flight can be abandoned.
    pub fn shutdown(&self) {
        info!("Shutting down daemon...");

        for (what, path) in [
            ("socket", &self.config.socket_path),
            ("PID", &self.config.lock_path),
            ("version", &self.config.version_path),
        ] {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    warn!("Failed to remove {} file: {}", what, e);
                }
            }
        }

        // Lock is released when self.lock_file is dropped
        info!("Daemon shutdown complete");
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Data directory not found at {0}: {1}")]
    DataDirNotFound(PathBuf, std::io::Error),

    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind socket at {0}: {1}")]
    BindFailed(PathBuf, std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the daemon
pub async fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    // Lock first; a failure here belongs to the daemon that holds it, so
    // nothing is cleaned up
    let lock_file = acquire_lock(config)?;

    match startup_inner(config, lock_file).await {
        Ok(state) => Ok(state),
        Err(e) => {
            cleanup_on_failure(config);
            Err(e)
        }
    }
}

fn acquire_lock(config: &Config) -> Result<File, LifecycleError> {
    if let Some(parent) = config.lock_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;
    Ok(lock_file)
}

/// Inner startup logic - cleanup_on_failure called if this fails
async fn startup_inner(config: &Config, mut lock_file: File) -> Result<DaemonState, LifecycleError> {
    // 1. Write PID to lock file
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    // 2. Create directories
    if let Some(parent) = config.socket_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if let Some(parent) = config.wal_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Write version file
    std::fs::write(&config.version_path, env!("CARGO_PKG_VERSION"))?;

    // 3. Load config BEFORE binding socket (fail fast on a bad rp.toml)
    let engine_config = EngineConfig::load(&config.data_dir)?;

    // 4. Replay the ledger
    let engine = Engine::open(&config.wal_path, engine_config)?;
    let status = engine.status();
    info!(
        "Loaded ledger: {} assets, {} people, {} open loans, {} open maintenance (seq {})",
        status.assets,
        status.people,
        status.open_loans,
        status.open_maintenance,
        status.wal_sequence
    );

    // 5. Remove stale socket and bind (LAST - only after all validation passes)
    if config.socket_path.exists() {
        std::fs::remove_file(&config.socket_path)?;
    }
    let listener = UnixListener::bind(&config.socket_path)
        .map_err(|e| LifecycleError::BindFailed(config.socket_path.clone(), e))?;

    info!("Daemon started for data dir: {}", config.data_dir.display());

    Ok(DaemonState {
        config: config.clone(),
        lock_file,
        listener,
        engine: Arc::new(engine),
        shutdown: Arc::new(Notify::new()),
    })
}

/// Clean up resources on startup failure
fn cleanup_on_failure(config: &Config) {
    for path in [&config.socket_path, &config.version_path, &config.lock_path] {
        if path.exists() {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Get the state directory for rp
fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("rp"));
    }

    let home = std::env::var("HOME").map_err(|_| LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/rp"))
}

/// Get the socket directory for rp
///
/// Uses /tmp/rp by default to keep paths short (macOS SUN_LEN = 104).
/// Can be overridden with RP_SOCKET_DIR for testing.
fn socket_dir() -> PathBuf {
    match std::env::var("RP_SOCKET_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => PathBuf::from("/tmp/rp"),
    }
}

/// First 8 bytes of the SHA-256 of the canonical data dir, hex encoded
pub fn data_dir_hash(path: &Path) -> String {
    let digest = Sha256::digest(path.to_string_lossy().as_bytes());
    digest[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
