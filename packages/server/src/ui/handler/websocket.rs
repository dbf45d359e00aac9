//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, Delivery, Timestamp},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage},
    ui::state::AppState,
    usecase::{CommandDispatcher, ConnectParticipantUseCase, DisconnectParticipantUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Create a channel for this connection to receive deliveries
    let (tx, rx) = mpsc::unbounded_channel();

    let connect_usecase = ConnectParticipantUseCase::new(state.repository.clone());
    let connection = match connect_usecase.execute(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            return;
        }
    };

    let (sender, mut receiver) = socket.split();

    // Writer: the only task that touches the sending half of the socket
    let mut send_task = tokio::spawn(write_deliveries(sender, rx, connection.clone()));

    let reader_id = connection.clone();
    let dispatcher = CommandDispatcher::new(state.repository.clone());
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", reader_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => handle_text(&dispatcher, &reader_id, text.as_str()).await,
                Message::Binary(_) => {
                    tracing::warn!("Ignoring binary frame from '{}'", reader_id);
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", reader_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let disconnect_usecase = DisconnectParticipantUseCase::new(state.repository.clone());
    if let Err(e) = disconnect_usecase.execute(connection.clone()).await {
        tracing::warn!("Failed to disconnect '{}': {}", connection, e);
    }
}

async fn write_deliveries(
    mut sender: SplitSink<WebSocket, Message>,
    mut rx: mpsc::UnboundedReceiver<Delivery>,
    connection: ConnectionId,
) {
    while let Some(delivery) = rx.recv().await {
        let frame = match ServerMessage::from(delivery).to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize frame for '{}': {}", connection, e);
                continue;
            }
        };
        if sender.send(Message::Text(frame.into())).await.is_err() {
            tracing::debug!("Writer for '{}' stopped: socket closed", connection);
            break;
        }
    }
}

/// Parse, validate and dispatch one text frame. Malformed frames are dropped
/// and the connection stays open.
async fn handle_text(dispatcher: &CommandDispatcher, origin: &ConnectionId, text: &str) {
    let command = match ClientMessage::parse(text)
        .and_then(|message| message.into_command(origin, Timestamp::now()))
    {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("Malformed event from '{}': {}", origin, e);
            return;
        }
    };

    if let Err(e) = dispatcher.dispatch(origin.clone(), command).await {
        tracing::warn!("Command from '{}' failed: {}", origin, e);
    }
}
