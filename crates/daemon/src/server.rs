// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Socket server and connection handling.

use ga_core::Effect;
use ga_daemon::protocol::{
    self, AlertSummary, Request, Response, DEFAULT_TIMEOUT, PROTOCOL_VERSION,
};
use ga_engine::{EngineError, SlotState};
use tokio::net::UnixStream;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

use crate::lifecycle::DaemonState;

/// A parsed request waiting for the event loop, with the way back to its client
pub struct PendingRequest {
    pub request: Request,
    pub reply: oneshot::Sender<Response>,
}

/// Serve a single client connection.
///
/// Runs on its own task: socket reads and writes never hold up the event
/// loop, which only sees the parsed request.
pub async fn serve_connection(
    stream: UnixStream,
    requests: mpsc::Sender<PendingRequest>,
) -> Result<(), ServerError> {
    // Split stream for reading/writing
    let (mut reader, mut writer) = stream.into_split();

    // Read request with timeout
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

    let (reply, response) = oneshot::channel();
    if requests.send(PendingRequest { request, reply }).await.is_err() {
        debug!("Event loop gone, dropping request");
        return Ok(());
    }
    let Ok(response) = response.await else {
        debug!("Request dropped without a response");
        return Ok(());
    };

    debug!("Sending response: {:?}", response);

    // Write response with timeout
    protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT)
        .await
        .map_err(ServerError::Protocol)?;

    Ok(())
}

/// Handle a request on the event loop and hand the response to its connection
pub async fn handle_pending(daemon: &mut DaemonState, pending: PendingRequest) {
    let response = handle_request(daemon, pending.request).await;
    if pending.reply.send(response).is_err() {
        debug!("Client connection closed before the response");
    }
}

/// Handle a single request and return a response
async fn handle_request(daemon: &mut DaemonState, request: Request) -> Response {
    match request {
        Request::Ping => Response::Pong,

        Request::Hello { version: _ } => Response::Hello {
            version: PROTOCOL_VERSION.to_string(),
        },

        Request::Status => status(daemon),

        Request::ListAlerts => {
            let alerts = daemon
                .engine
                .alerts()
                .iter()
                .enumerate()
                .map(|(index, alert)| AlertSummary {
                    index,
                    alert: alert.clone(),
                    next_trigger: match daemon.engine.slot_state(index) {
                        SlotState::Armed(at) => Some(at),
                        SlotState::Unscheduled => None,
                    },
                })
                .collect();
            Response::Alerts { alerts }
        }

        Request::AddAlert { alert } => {
            let (index, effects) = daemon.engine.add_alert(alert);
            daemon.apply(effects).await;
            Response::Added { index }
        }

        Request::EditAlert { index, alert } => {
            let result = daemon.engine.edit_alert(index, alert);
            committed(daemon, result, |_| Response::Ok).await
        }

        Request::ToggleAlert { index, enabled } => {
            let result = daemon.engine.toggle_alert(index, enabled);
            committed(daemon, result, |_| Response::Ok).await
        }

        Request::RemoveAlert { index } => {
            let result = daemon
                .engine
                .remove_alert(index)
                .map(|(alert, effects)| (effects, alert));
            committed_with(daemon, result, |alert| Response::Removed { alert }).await
        }

        Request::DelayActive { minutes } => {
            let showing = daemon.executor.showing().await;
            let result = daemon
                .engine
                .delay_active(minutes, &showing)
                .map(|(count, effects)| (effects, count));
            committed_with(daemon, result, |count| Response::Delayed { count }).await
        }

        Request::TestAlert { index } => {
            let result = daemon.engine.test_alert(index);
            committed(daemon, result, |_| Response::Ok).await
        }

        Request::TestDefaults => {
            let effects = daemon.engine.test_defaults(&daemon.settings);
            daemon.apply(effects).await;
            Response::Ok
        }

        Request::StopAlerts => {
            daemon.apply(vec![Effect::DismissPresentations]).await;
            Response::Ok
        }

        Request::Shutdown => {
            daemon.shutdown_requested = true;
            Response::ShuttingDown
        }
    }
}

fn status(daemon: &DaemonState) -> Response {
    let alerts = daemon.engine.alerts();
    let armed = daemon.engine.armed();
    let delayed = daemon.engine.delayed();
    let next_alert = armed
        .iter()
        .map(|(_, at)| *at)
        .chain(delayed.iter().map(|(at, _)| *at))
        .min();

    Response::Status {
        uptime_secs: daemon.start_time.elapsed().as_secs(),
        alerts: alerts.len(),
        enabled: alerts.iter().filter(|a| a.enabled).count(),
        armed: armed.len(),
        delayed: delayed.len(),
        next_alert,
    }
}

/// Run the effects of a committed transition, or report why it was refused
async fn committed(
    daemon: &DaemonState,
    result: Result<Vec<Effect>, EngineError>,
    respond: impl FnOnce(()) -> Response,
) -> Response {
    committed_with(daemon, result.map(|effects| (effects, ())), respond).await
}

async fn committed_with<T>(
    daemon: &DaemonState,
    result: Result<(Vec<Effect>, T), EngineError>,
    respond: impl FnOnce(T) -> Response,
) -> Response {
    match result {
        Ok((effects, value)) => {
            daemon.apply(effects).await;
            respond(value)
        }
        Err(e) => Response::Error {
            message: e.to_string(),
        },
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
