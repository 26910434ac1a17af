// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Socket server and connection handling.

use rp_core::{AssetId, Clock, PersonId};
use rp_engine::{Directory, Engine, EngineError};
use tokio::net::UnixStream;
use tokio::sync::Notify;
use tracing::{debug, error, warn};

use crate::protocol::{
    self, AssetDetail, AssetRef, PersonDetail, PersonRef, RecordRef, Request, Response,
    StatsReport, DEFAULT_TIMEOUT, PROTOCOL_VERSION,
};

/// Handle a single client connection
///
/// Runs on its own task; connections to different assets proceed in
/// parallel and the engine serializes the ones that collide.
pub async fn handle_connection<C: Clock, D: Directory>(
    engine: &Engine<C, D>,
    shutdown: &Notify,
    stream: UnixStream,
) -> Result<(), ServerError> {
    let (mut reader, mut writer) = stream.into_split();

    let request = match protocol::read_request(&mut reader, DEFAULT_TIMEOUT).await {
        Ok(req) => req,
        Err(protocol::ProtocolError::Timeout) => {
            error!("Request read timeout");
            return Err(ServerError::Timeout);
        }
        Err(protocol::ProtocolError::ConnectionClosed) => {
            debug!("Client disconnected before sending request");
            return Ok(());
        }
        Err(e) => {
            error!("Failed to read request: {}", e);
            return Err(ServerError::Protocol(e));
        }
    };

    debug!("Received request: {:?}", request);

    let response = handle_request(engine, shutdown, request).await;

    debug!("Sending response: {:?}", response);

    protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT)
        .await
        .map_err(ServerError::Protocol)?;

    Ok(())
}

/// Handle a single request and return a response
pub async fn handle_request<C: Clock, D: Directory>(
    engine: &Engine<C, D>,
    shutdown: &Notify,
    request: Request,
) -> Response {
    dispatch(engine, shutdown, request)
        .await
        .unwrap_or_else(Response::from)
}

async fn dispatch<C: Clock, D: Directory>(
    engine: &Engine<C, D>,
    shutdown: &Notify,
    request: Request,
) -> Result<Response, EngineError> {
    let response = match request {
        Request::Ping => Response::Pong,

        Request::Hello { version } => {
            if version != PROTOCOL_VERSION {
                warn!(client = %version, daemon = PROTOCOL_VERSION, "version mismatch");
            }
            Response::Hello {
                version: PROTOCOL_VERSION.to_string(),
            }
        }

        Request::Shutdown => {
            shutdown.notify_one();
            Response::ShuttingDown
        }

        Request::Status => Response::Status {
            status: engine.status(),
        },

        Request::CreateAsset { attributes } => Response::Asset {
            asset: engine.create_asset(attributes)?,
        },
        Request::UpdateAsset { asset, patch } => {
            let id = resolve_asset(engine, asset)?;
            Response::Asset {
                asset: engine.update_asset(id, patch).await?,
            }
        }
        Request::DeleteAsset { asset } => {
            let id = resolve_asset(engine, asset)?;
            Response::Asset {
                asset: engine.delete_asset(id).await?,
            }
        }
        Request::GetAsset { asset } => {
            let id = resolve_asset(engine, asset)?;
            Response::AssetDetail {
                detail: Box::new(AssetDetail {
                    asset: engine.get_asset(id)?,
                    state: engine.query_asset_state(id)?,
                    loan: engine.active_loan_for(id)?,
                    maintenance: engine.active_maintenance_for(id)?,
                }),
            }
        }
        Request::ListAssets { state } => Response::Assets {
            assets: engine.list_assets(state),
        },
        Request::QueryState { asset } => {
            let id = resolve_asset(engine, asset)?;
            let state = engine.query_asset_state(id)?;
            Response::State {
                code: engine.get_asset(id)?.code,
                state,
            }
        }

        Request::CreatePerson { person } => Response::Person {
            person: engine.create_person(person).await?,
        },
        Request::UpdatePerson { person, patch } => {
            let id = resolve_person(engine, person)?;
            Response::Person {
                person: engine.update_person(id, patch).await?,
            }
        }
        Request::DeletePerson { person } => {
            let id = resolve_person(engine, person)?;
            Response::Person {
                person: engine.delete_person(id)?,
            }
        }
        Request::GetPerson { person } => {
            let id = resolve_person(engine, person)?;
            Response::PersonDetail {
                detail: Box::new(PersonDetail {
                    person: engine.get_person(id)?,
                    active_loans: engine.active_loans_for(id)?,
                }),
            }
        }
        Request::ListPeople { filter } => Response::People {
            people: engine.list_people(&filter),
        },

        Request::CreateTeam { team } => Response::Team {
            team: engine.create_team(team)?,
        },
        Request::DeleteTeam { id } => Response::Team {
            team: engine.delete_team(id).await?,
        },
        Request::ListTeams => Response::Teams {
            teams: engine.list_teams(),
        },
        Request::CreateCenter { center } => Response::Center {
            center: engine.create_center(center)?,
        },
        Request::DeleteCenter { id } => Response::Center {
            center: engine.delete_center(id).await?,
        },
        Request::ListCenters => Response::Centers {
            centers: engine.list_centers(),
        },

        Request::StartLoan {
            asset,
            person,
            accessories,
            comment,
        } => {
            let asset = resolve_asset(engine, asset)?;
            let person = resolve_person(engine, person)?;
            Response::Loan {
                loan: engine
                    .start_loan(asset, person, accessories, comment)
                    .await?,
            }
        }
        Request::EndLoan { id, comment } => Response::Loan {
            loan: engine.end_loan(id, comment).await?,
        },
        Request::SetLoanComment { id, comment } => Response::Loan {
            loan: engine.set_loan_comment(id, comment)?,
        },
        Request::GetLoan { id } => Response::Loan {
            loan: engine.get_loan(id)?,
        },
        Request::LoanHistory { filter } => Response::Loans {
            loans: engine.loan_history(&filter),
        },

        Request::StartMaintenance { asset, request } => {
            let asset = resolve_asset(engine, asset)?;
            Response::Maintenance {
                episode: engine.start_maintenance(asset, request).await?,
            }
        }
        Request::EndMaintenance { id } => Response::Maintenance {
            episode: engine.end_maintenance(id).await?,
        },
        Request::GetMaintenance { id } => Response::Maintenance {
            episode: engine.get_maintenance(id)?,
        },
        Request::MaintenanceHistory { filter } => Response::MaintenanceEpisodes {
            episodes: engine.maintenance_history(&filter),
        },

        Request::Stats { top } => Response::Stats {
            report: Box::new(StatsReport {
                loans: engine.loan_stats(),
                maintenance: engine.maintenance_stats(),
                top_assets: engine.top_assets(top),
                top_borrowers: engine.top_borrowers(top),
            }),
        },
    };
    Ok(response)
}

fn resolve_asset<C: Clock, D: Directory>(
    engine: &Engine<C, D>,
    asset: AssetRef,
) -> Result<AssetId, EngineError> {
    match asset {
        RecordRef::Id(id) => Ok(id),
        RecordRef::Code(code) => Ok(engine.asset_by_code(&code)?.id),
    }
}

fn resolve_person<C: Clock, D: Directory>(
    engine: &Engine<C, D>,
    person: PersonRef,
) -> Result<PersonId, EngineError> {
    match person {
        RecordRef::Id(id) => Ok(id),
        RecordRef::Code(code) => Ok(engine.person_by_code(&code)?.id),
    }
}

/// Server errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),

    #[error("Request timeout")]
    Timeout,
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
