// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon client for CLI commands

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use rp_core::{
    Accessories, Asset, AssetAttributes, AssetId, AssetPatch, AssetState, CenterId, Code,
    HistoryFilter, LoanEpisode, LoanId, MaintenanceEpisode, MaintenanceId, NewCenter,
    NewMaintenance, NewPerson, NewTeam, Person, PersonId, PersonPatch, Team, TeamId,
    TrainingCenter,
};
use rp_daemon::protocol::{self, ProtocolError};
use rp_daemon::{
    AssetDetail, AssetRef, Config, LifecycleError, PersonDetail, PersonRef, RecordRef, Request,
    Response, StatsReport, STARTUP_MARKER_PREFIX,
};
use rp_engine::{EngineStatus, ErrorKind, PersonFilter, CONFIG_FILE};
use thiserror::Error;
use tokio::net::UnixStream;

// Timeout configuration (env vars in milliseconds)
fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Timeout for IPC requests
pub fn timeout_ipc() -> Duration {
    parse_duration_ms("RP_TIMEOUT_IPC_MS").unwrap_or(Duration::from_secs(10))
}

/// Timeout for waiting for daemon to start
pub fn timeout_connect() -> Duration {
    parse_duration_ms("RP_TIMEOUT_CONNECT_MS").unwrap_or(Duration::from_secs(5))
}

/// Timeout for waiting for process to exit
pub fn timeout_exit() -> Duration {
    parse_duration_ms("RP_TIMEOUT_EXIT_MS").unwrap_or(Duration::from_secs(2))
}

/// Polling interval for retries
pub fn poll_interval() -> Duration {
    parse_duration_ms("RP_POLL_INTERVAL_MS").unwrap_or(Duration::from_millis(50))
}

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Daemon not running")]
    DaemonNotRunning,

    #[error("Failed to start daemon: {0}")]
    DaemonStartFailed(String),

    #[error("Connection timeout waiting for daemon to start")]
    DaemonStartTimeout,

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("{message}")]
    Rejected { kind: ErrorKind, message: String },

    #[error("Unexpected response from daemon")]
    UnexpectedResponse,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("Could not determine data directory")]
    NoDataDir,
}

/// Unwrap the one response variant a request expects
macro_rules! expect_response {
    ($response:expr, $pattern:pat => $value:expr) => {
        match $response {
            $pattern => Ok($value),
            Response::Error { kind, message } => Err(ClientError::Rejected { kind, message }),
            _ => Err(ClientError::UnexpectedResponse),
        }
    };
}

/// Daemon client
pub struct DaemonClient {
    socket_path: PathBuf,
}

impl DaemonClient {
    /// Connect to daemon, auto-starting if not running
    pub async fn connect_or_start(config: &Config) -> Result<Self, ClientError> {
        // Restart a daemon left behind by a different build
        if let Ok(daemon_version) = std::fs::read_to_string(&config.version_path) {
            if daemon_version.trim() != env!("CARGO_PKG_VERSION") {
                tracing::debug!(daemon = daemon_version.trim(), "daemon version mismatch");
                let _ = daemon_stop(config).await;
            }
        }

        match Self::connect(config) {
            Ok(client) => Ok(client),
            Err(ClientError::DaemonNotRunning) => {
                let child = start_daemon_background(&config.data_dir)?;
                Self::connect_with_retry(config, timeout_connect(), child).await
            }
            Err(e) => Err(wrap_with_startup_error(e, config)),
        }
    }

    /// Connect to existing daemon (no auto-start)
    pub fn connect(config: &Config) -> Result<Self, ClientError> {
        if !config.socket_path.exists() {
            return Err(ClientError::DaemonNotRunning);
        }

        Ok(Self {
            socket_path: config.socket_path.clone(),
        })
    }

    async fn connect_with_retry(
        config: &Config,
        timeout: Duration,
        mut child: std::process::Child,
    ) -> Result<Self, ClientError> {
        let start = Instant::now();
        while start.elapsed() < timeout {
            // An early exit means startup failed; the reason is in the log
            if let Ok(Some(status)) = child.try_wait() {
                let poll_start = Instant::now();
                while poll_start.elapsed() < timeout_exit() {
                    if let Some(err) = read_startup_error(config) {
                        return Err(ClientError::DaemonStartFailed(err));
                    }
                    tokio::time::sleep(poll_interval()).await;
                }
                return Err(ClientError::DaemonStartFailed(format!(
                    "exited with {}",
                    status
                )));
            }

            match Self::connect(config) {
                Ok(client) => return Ok(client),
                Err(ClientError::DaemonNotRunning) => {
                    tokio::time::sleep(poll_interval()).await;
                }
                Err(e) => return Err(wrap_with_startup_error(e, config)),
            }
        }

        Err(wrap_with_startup_error(
            ClientError::DaemonStartTimeout,
            config,
        ))
    }

    /// Send a request and receive a response with specific timeouts
    async fn send_with_timeout(
        &self,
        request: &Request,
        read_timeout: Duration,
        write_timeout: Duration,
    ) -> Result<Response, ClientError> {
        let stream = UnixStream::connect(&self.socket_path).await?;
        let (mut reader, mut writer) = stream.into_split();

        let data = protocol::encode(request)?;
        tokio::time::timeout(write_timeout, protocol::write_message(&mut writer, &data))
            .await
            .map_err(|_| ProtocolError::Timeout)??;

        let response_bytes =
            tokio::time::timeout(read_timeout, protocol::read_message(&mut reader))
                .await
                .map_err(|_| ProtocolError::Timeout)??;

        Ok(protocol::decode(&response_bytes)?)
    }

    /// Send a request and receive a response
    pub async fn send(&self, request: Request) -> Result<Response, ClientError> {
        self.send_with_timeout(&request, timeout_ipc(), timeout_ipc())
            .await
    }

    /// Get daemon version via Hello handshake
    pub async fn hello(&self) -> Result<String, ClientError> {
        let response = self
            .send(Request::Hello {
                version: env!("CARGO_PKG_VERSION").to_string(),
            })
            .await?;
        expect_response!(response, Response::Hello { version } => version)
    }

    pub async fn status(&self) -> Result<EngineStatus, ClientError> {
        expect_response!(self.send(Request::Status).await?, Response::Status { status } => status)
    }

    /// Request daemon shutdown
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        expect_response!(self.send(Request::Shutdown).await?, Response::ShuttingDown => ())
    }

    // --- assets ---

    pub async fn create_asset(&self, attributes: AssetAttributes) -> Result<Asset, ClientError> {
        let response = self.send(Request::CreateAsset { attributes }).await?;
        expect_response!(response, Response::Asset { asset } => asset)
    }

    pub async fn update_asset(&self, asset: AssetRef, patch: AssetPatch) -> Result<Asset, ClientError> {
        let response = self.send(Request::UpdateAsset { asset, patch }).await?;
        expect_response!(response, Response::Asset { asset } => asset)
    }

    pub async fn delete_asset(&self, asset: AssetRef) -> Result<Asset, ClientError> {
        let response = self.send(Request::DeleteAsset { asset }).await?;
        expect_response!(response, Response::Asset { asset } => asset)
    }

    pub async fn get_asset(&self, asset: AssetRef) -> Result<AssetDetail, ClientError> {
        let response = self.send(Request::GetAsset { asset }).await?;
        expect_response!(response, Response::AssetDetail { detail } => *detail)
    }

    pub async fn list_assets(&self, state: Option<AssetState>) -> Result<Vec<Asset>, ClientError> {
        let response = self.send(Request::ListAssets { state }).await?;
        expect_response!(response, Response::Assets { assets } => assets)
    }

    pub async fn asset_state(&self, asset: AssetRef) -> Result<(Code, AssetState), ClientError> {
        let response = self.send(Request::QueryState { asset }).await?;
        expect_response!(response, Response::State { code, state } => (code, state))
    }

    /// Surrogate id for a reference, asking the daemon when given a code
    pub async fn resolve_asset(&self, asset: AssetRef) -> Result<AssetId, ClientError> {
        match asset {
            RecordRef::Id(id) => Ok(id),
            code => Ok(self.get_asset(code).await?.asset.id),
        }
    }

    // --- people ---

    pub async fn create_person(&self, person: NewPerson) -> Result<Person, ClientError> {
        let response = self.send(Request::CreatePerson { person }).await?;
        expect_response!(response, Response::Person { person } => person)
    }

    pub async fn update_person(
        &self,
        person: PersonRef,
        patch: PersonPatch,
    ) -> Result<Person, ClientError> {
        let response = self.send(Request::UpdatePerson { person, patch }).await?;
        expect_response!(response, Response::Person { person } => person)
    }

    pub async fn delete_person(&self, person: PersonRef) -> Result<Person, ClientError> {
        let response = self.send(Request::DeletePerson { person }).await?;
        expect_response!(response, Response::Person { person } => person)
    }

    pub async fn get_person(&self, person: PersonRef) -> Result<PersonDetail, ClientError> {
        let response = self.send(Request::GetPerson { person }).await?;
        expect_response!(response, Response::PersonDetail { detail } => *detail)
    }

    pub async fn list_people(&self, filter: PersonFilter) -> Result<Vec<Person>, ClientError> {
        let response = self.send(Request::ListPeople { filter }).await?;
        expect_response!(response, Response::People { people } => people)
    }

    pub async fn resolve_person(&self, person: PersonRef) -> Result<PersonId, ClientError> {
        match person {
            RecordRef::Id(id) => Ok(id),
            code => Ok(self.get_person(code).await?.person.id),
        }
    }

    // --- teams and centers ---

    pub async fn create_team(&self, team: NewTeam) -> Result<Team, ClientError> {
        let response = self.send(Request::CreateTeam { team }).await?;
        expect_response!(response, Response::Team { team } => team)
    }

    pub async fn delete_team(&self, id: TeamId) -> Result<Team, ClientError> {
        let response = self.send(Request::DeleteTeam { id }).await?;
        expect_response!(response, Response::Team { team } => team)
    }

    pub async fn list_teams(&self) -> Result<Vec<Team>, ClientError> {
        expect_response!(self.send(Request::ListTeams).await?, Response::Teams { teams } => teams)
    }

    pub async fn create_center(&self, center: NewCenter) -> Result<TrainingCenter, ClientError> {
        let response = self.send(Request::CreateCenter { center }).await?;
        expect_response!(response, Response::Center { center } => center)
    }

    pub async fn delete_center(&self, id: CenterId) -> Result<TrainingCenter, ClientError> {
        let response = self.send(Request::DeleteCenter { id }).await?;
        expect_response!(response, Response::Center { center } => center)
    }

    pub async fn list_centers(&self) -> Result<Vec<TrainingCenter>, ClientError> {
        let response = self.send(Request::ListCenters).await?;
        expect_response!(response, Response::Centers { centers } => centers)
    }

    // --- loans ---

    pub async fn start_loan(
        &self,
        asset: AssetRef,
        person: PersonRef,
        accessories: Accessories,
        comment: Option<String>,
    ) -> Result<LoanEpisode, ClientError> {
        let response = self
            .send(Request::StartLoan {
                asset,
                person,
                accessories,
                comment,
            })
            .await?;
        expect_response!(response, Response::Loan { loan } => loan)
    }

    pub async fn end_loan(
        &self,
        id: LoanId,
        comment: Option<String>,
    ) -> Result<LoanEpisode, ClientError> {
        let response = self.send(Request::EndLoan { id, comment }).await?;
        expect_response!(response, Response::Loan { loan } => loan)
    }

    pub async fn set_loan_comment(
        &self,
        id: LoanId,
        comment: Option<String>,
    ) -> Result<LoanEpisode, ClientError> {
        let response = self.send(Request::SetLoanComment { id, comment }).await?;
        expect_response!(response, Response::Loan { loan } => loan)
    }

    pub async fn get_loan(&self, id: LoanId) -> Result<LoanEpisode, ClientError> {
        let response = self.send(Request::GetLoan { id }).await?;
        expect_response!(response, Response::Loan { loan } => loan)
    }

    pub async fn loan_history(&self, filter: HistoryFilter) -> Result<Vec<LoanEpisode>, ClientError> {
        let response = self.send(Request::LoanHistory { filter }).await?;
        expect_response!(response, Response::Loans { loans } => loans)
    }

    // --- maintenance ---

    pub async fn start_maintenance(
        &self,
        asset: AssetRef,
        request: NewMaintenance,
    ) -> Result<MaintenanceEpisode, ClientError> {
        let response = self
            .send(Request::StartMaintenance { asset, request })
            .await?;
        expect_response!(response, Response::Maintenance { episode } => episode)
    }

    pub async fn end_maintenance(&self, id: MaintenanceId) -> Result<MaintenanceEpisode, ClientError> {
        let response = self.send(Request::EndMaintenance { id }).await?;
        expect_response!(response, Response::Maintenance { episode } => episode)
    }

    pub async fn get_maintenance(&self, id: MaintenanceId) -> Result<MaintenanceEpisode, ClientError> {
        let response = self.send(Request::GetMaintenance { id }).await?;
        expect_response!(response, Response::Maintenance { episode } => episode)
    }

    pub async fn maintenance_history(
        &self,
        filter: HistoryFilter,
    ) -> Result<Vec<MaintenanceEpisode>, ClientError> {
        let response = self.send(Request::MaintenanceHistory { filter }).await?;
        expect_response!(response, Response::MaintenanceEpisodes { episodes } => episodes)
    }

    pub async fn stats(&self, top: usize) -> Result<StatsReport, ClientError> {
        let response = self.send(Request::Stats { top }).await?;
        expect_response!(response, Response::Stats { report } => *report)
    }
}

/// Start the daemon in the background, returning the child process handle
fn start_daemon_background(data_dir: &Path) -> Result<std::process::Child, ClientError> {
    let rpd_path = find_rpd_binary();

    Command::new(&rpd_path)
        .arg(data_dir)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map_err(|e| ClientError::DaemonStartFailed(format!("{}: {}", rpd_path.display(), e)))
}

/// Stop the daemon (graceful first, then forceful)
/// Returns true if daemon was stopped, false if it wasn't running
pub async fn daemon_stop(config: &Config) -> Result<bool, ClientError> {
    let client = match DaemonClient::connect(config) {
        Ok(c) => c,
        Err(ClientError::DaemonNotRunning) => {
            cleanup_stale_pid(config);
            return Ok(false);
        }
        Err(e) => return Err(e),
    };

    let shutdown_result = client.shutdown().await;

    if let Some(pid) = read_daemon_pid(config) {
        if shutdown_result.is_ok() {
            wait_for_exit(pid, timeout_exit()).await;
        }

        if process_exists(pid) {
            force_kill_daemon(pid);
            wait_for_exit(pid, timeout_exit()).await;
        }
    }

    cleanup_stale_pid(config);
    if config.socket_path.exists() {
        let _ = std::fs::remove_file(&config.socket_path);
    }

    Ok(true)
}

/// Wait for a process to exit
async fn wait_for_exit(pid: u32, timeout: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if !process_exists(pid) {
            return true;
        }
        tokio::time::sleep(poll_interval()).await;
    }
    false
}

/// Find the rpd binary
pub fn find_rpd_binary() -> PathBuf {
    // Explicit override (used by tests to ensure correct binary)
    if let Ok(path) = std::env::var("RP_DAEMON_BINARY") {
        return PathBuf::from(path);
    }

    // Sibling of the running executable
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let sibling = dir.join("rpd");
            if sibling.exists() {
                return sibling;
            }
        }
    }

    // Fall back to PATH lookup
    PathBuf::from("rpd")
}

/// Find the data directory
///
/// Checks RP_DATA_DIR first, then walks up looking for an `rp.toml`, and
/// otherwise uses the current directory.
pub fn find_data_dir() -> Result<PathBuf, ClientError> {
    if let Ok(dir) = std::env::var("RP_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let cwd = std::env::current_dir().map_err(|_| ClientError::NoDataDir)?;
    let mut current = cwd.clone();
    loop {
        if current.join(CONFIG_FILE).is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Ok(cwd);
        }
    }
}

/// Remove an orphaned PID file left by a daemon that is no longer running
fn cleanup_stale_pid(config: &Config) {
    if config.lock_path.exists() {
        let _ = std::fs::remove_file(&config.lock_path);
    }
}

/// Get the PID from the daemon PID file, if it exists
pub fn read_daemon_pid(config: &Config) -> Option<u32> {
    std::fs::read_to_string(&config.lock_path)
        .ok()
        .and_then(|content| content.trim().parse::<u32>().ok())
}

/// Check if a process with the given PID exists
pub fn process_exists(pid: u32) -> bool {
    // kill -0 checks for the process without signalling it
    Command::new("kill")
        .args(["-0", &pid.to_string()])
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Force kill a daemon process
pub fn force_kill_daemon(pid: u32) -> bool {
    Command::new("kill")
        .args(["-9", &pid.to_string()])
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Read daemon log from the last startup marker, looking for errors.
/// Returns the error message if found, None otherwise.
pub fn read_startup_error(config: &Config) -> Option<String> {
    let content = std::fs::read_to_string(&config.log_path).ok()?;

    let start_pos = content.rfind(STARTUP_MARKER_PREFIX)?;
    let startup_log = &content[start_pos..];

    let errors: Vec<&str> = startup_log
        .lines()
        .filter(|line| line.contains(" ERROR ") || line.contains("Failed to start"))
        .collect();

    if errors.is_empty() {
        return None;
    }

    // Format: "timestamp LEVEL target: message"
    let messages: Vec<String> = errors
        .iter()
        .filter_map(|line| line.split_once(": ").map(|(_, msg)| msg.to_string()))
        .collect();

    if messages.is_empty() {
        Some(errors.join("\n"))
    } else {
        Some(messages.join("\n"))
    }
}

/// Prefer the daemon's own startup error over a generic connection failure
fn wrap_with_startup_error(err: ClientError, config: &Config) -> ClientError {
    if matches!(err, ClientError::DaemonStartFailed(_)) {
        return err;
    }

    match read_startup_error(config) {
        Some(startup_error) => ClientError::DaemonStartFailed(startup_error),
        None => err,
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
