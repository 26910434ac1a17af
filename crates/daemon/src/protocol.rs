// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire protocol between `rp` and `rpd`
//!
//! Every message is a 4-byte big-endian length followed by that many bytes of
//! JSON. A connection carries exactly one request and one response.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rp_core::{
    Accessories, Asset, AssetAttributes, AssetId, AssetPatch, AssetState, CenterId, Code,
    HistoryFilter, LoanEpisode, LoanId, MaintenanceEpisode, MaintenanceId, NewCenter,
    NewMaintenance, NewPerson, NewTeam, Person, PersonId, PersonPatch, Team, TeamId,
    TrainingCenter,
};
use rp_engine::{
    AssetUsage, BorrowerUsage, EngineError, EngineStatus, ErrorKind, LoanStats,
    MaintenanceStats, PersonFilter,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Version exchanged in the hello handshake
pub const PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default read/write timeout on the daemon side
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest message either side will accept
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// A record addressed by surrogate id or by its public code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordRef<I> {
    Id(I),
    Code(Code),
}

pub type AssetRef = RecordRef<AssetId>;
pub type PersonRef = RecordRef<PersonId>;

impl<I: fmt::Display> fmt::Display for RecordRef<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordRef::Id(id) => write!(f, "#{id}"),
            RecordRef::Code(code) => write!(f, "{code}"),
        }
    }
}

/// Accepts `RAD-00042`/`USR-00007` or a bare numeric id
impl<I: From<u64>> FromStr for RecordRef<I> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.trim_start_matches('#').parse::<u64>() {
            return Ok(RecordRef::Id(I::from(id)));
        }
        s.parse::<Code>()
            .map(RecordRef::Code)
            .map_err(|e| e.to_string())
    }
}

/// Request from CLI to daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    Ping,
    Hello {
        version: String,
    },
    Status,
    Shutdown,

    CreateAsset {
        attributes: AssetAttributes,
    },
    UpdateAsset {
        asset: AssetRef,
        patch: AssetPatch,
    },
    DeleteAsset {
        asset: AssetRef,
    },
    GetAsset {
        asset: AssetRef,
    },
    ListAssets {
        #[serde(default)]
        state: Option<AssetState>,
    },
    QueryState {
        asset: AssetRef,
    },

    CreatePerson {
        person: NewPerson,
    },
    UpdatePerson {
        person: PersonRef,
        patch: PersonPatch,
    },
    DeletePerson {
        person: PersonRef,
    },
    GetPerson {
        person: PersonRef,
    },
    ListPeople {
        #[serde(default)]
        filter: PersonFilter,
    },

    CreateTeam {
        team: NewTeam,
    },
    DeleteTeam {
        id: TeamId,
    },
    ListTeams,
    CreateCenter {
        center: NewCenter,
    },
    DeleteCenter {
        id: CenterId,
    },
    ListCenters,

    StartLoan {
        asset: AssetRef,
        person: PersonRef,
        #[serde(default)]
        accessories: Accessories,
        #[serde(default)]
        comment: Option<String>,
    },
    EndLoan {
        id: LoanId,
        #[serde(default)]
        comment: Option<String>,
    },
    SetLoanComment {
        id: LoanId,
        comment: Option<String>,
    },
    GetLoan {
        id: LoanId,
    },
    LoanHistory {
        #[serde(default)]
        filter: HistoryFilter,
    },

    StartMaintenance {
        asset: AssetRef,
        request: NewMaintenance,
    },
    EndMaintenance {
        id: MaintenanceId,
    },
    GetMaintenance {
        id: MaintenanceId,
    },
    MaintenanceHistory {
        #[serde(default)]
        filter: HistoryFilter,
    },

    Stats {
        top: usize,
    },
}

/// An asset together with its derived state and open episode, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDetail {
    pub asset: Asset,
    pub state: AssetState,
    pub loan: Option<LoanEpisode>,
    pub maintenance: Option<MaintenanceEpisode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDetail {
    pub person: Person,
    pub active_loans: Vec<LoanEpisode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub loans: LoanStats,
    pub maintenance: MaintenanceStats,
    pub top_assets: Vec<AssetUsage>,
    pub top_borrowers: Vec<BorrowerUsage>,
}

/// Response from daemon to CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    Pong,
    Hello {
        version: String,
    },
    ShuttingDown,
    Status {
        status: EngineStatus,
    },

    Asset {
        asset: Asset,
    },
    AssetDetail {
        detail: Box<AssetDetail>,
    },
    Assets {
        assets: Vec<Asset>,
    },
    State {
        code: Code,
        state: AssetState,
    },

    Person {
        person: Person,
    },
    PersonDetail {
        detail: Box<PersonDetail>,
    },
    People {
        people: Vec<Person>,
    },

    Team {
        team: Team,
    },
    Teams {
        teams: Vec<Team>,
    },
    Center {
        center: TrainingCenter,
    },
    Centers {
        centers: Vec<TrainingCenter>,
    },

    Loan {
        loan: LoanEpisode,
    },
    Loans {
        loans: Vec<LoanEpisode>,
    },
    Maintenance {
        episode: MaintenanceEpisode,
    },
    MaintenanceEpisodes {
        episodes: Vec<MaintenanceEpisode>,
    },

    Stats {
        report: Box<StatsReport>,
    },

    Error {
        kind: ErrorKind,
        message: String,
    },
}

impl From<EngineError> for Response {
    fn from(err: EngineError) -> Self {
        Response::Error {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Protocol errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message of {size} bytes exceeds limit of {max}")]
    MessageTooLarge { size: usize, max: usize },

    #[error("connection closed")]
    ConnectionClosed,

    #[error("timed out")]
    Timeout,
}

/// Serialize a message to JSON (no length prefix)
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, ProtocolError> {
    Ok(serde_json::to_vec(message)?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ProtocolError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Write one length-prefixed frame
pub async fn write_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    data: &[u8],
) -> Result<(), ProtocolError> {
    if data.len() > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            size: data.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }
    let len = data.len() as u32;
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(data).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one length-prefixed frame
pub async fn read_message<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>, ProtocolError> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(ProtocolError::ConnectionClosed)
        }
        Err(e) => return Err(e.into()),
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            size: len,
            max: MAX_MESSAGE_SIZE,
        });
    }

    let mut data = vec![0u8; len];
    reader.read_exact(&mut data).await?;
    Ok(data)
}

pub async fn read_request<R: AsyncRead + Unpin>(
    reader: &mut R,
    timeout: Duration,
) -> Result<Request, ProtocolError> {
    let bytes = tokio::time::timeout(timeout, read_message(reader))
        .await
        .map_err(|_| ProtocolError::Timeout)??;
    decode(&bytes)
}

pub async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &Response,
    timeout: Duration,
) -> Result<(), ProtocolError> {
    let data = encode(response)?;
    tokio::time::timeout(timeout, write_message(writer, &data))
        .await
        .map_err(|_| ProtocolError::Timeout)?
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
