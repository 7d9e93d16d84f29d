//! Per-connection subscription bookkeeping.
//!
//! A `Connection` owns the subscriptions of one authenticated socket. Each
//! subscription is a task that forwards broadcaster events into the
//! connection's outbound queue; dropping the connection aborts them all.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::adapters::events::ShipmentBroadcaster;
use crate::domain::foundation::{authorize, Action, Principal};
use crate::domain::shipment::ShipmentEventKind;

use super::messages::{ClientMessage, ServerMessage};

/// Whether the socket should stay open after a client frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close,
}

pub struct Connection {
    principal: Principal,
    broadcaster: ShipmentBroadcaster,
    outbound: mpsc::Sender<ServerMessage>,
    active: HashMap<String, JoinHandle<()>>,
}

impl Connection {
    pub fn new(
        principal: Principal,
        broadcaster: ShipmentBroadcaster,
        outbound: mpsc::Sender<ServerMessage>,
    ) -> Self {
        Self {
            principal,
            broadcaster,
            outbound,
            active: HashMap::new(),
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Number of live subscriptions on this connection.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Applies one client frame received after the handshake.
    pub async fn handle(&mut self, message: ClientMessage) -> Flow {
        match message {
            ClientMessage::Ping => {
                self.reply(ServerMessage::Pong).await;
                Flow::Continue
            }
            ClientMessage::Subscribe { id, event } => {
                self.subscribe(id, &event).await;
                Flow::Continue
            }
            ClientMessage::Unsubscribe { id } => {
                self.unsubscribe(&id).await;
                Flow::Continue
            }
            ClientMessage::ConnectionInit { .. } => {
                self.reply(ServerMessage::error(None, "Too many initialisation requests"))
                    .await;
                Flow::Close
            }
        }
    }

    /// Answers a frame that could not be parsed.
    pub async fn handle_invalid(&self, message: String) {
        self.reply(ServerMessage::error(None, message)).await;
    }

    async fn subscribe(&mut self, id: String, event: &str) {
        if let Err(denial) = authorize(Some(&self.principal), &Action::ReadShipments) {
            self.reply(ServerMessage::error(Some(&id), denial.to_string()))
                .await;
            return;
        }
        if self.active.contains_key(&id) {
            self.reply(ServerMessage::error(
                Some(&id),
                format!("Subscriber for {} already exists", id),
            ))
            .await;
            return;
        }
        let kind: ShipmentEventKind = match event.parse() {
            Ok(kind) => kind,
            Err(e) => {
                self.reply(ServerMessage::error(Some(&id), e.to_string()))
                    .await;
                return;
            }
        };

        // Register before spawning so nothing published after this returns is missed.
        let mut subscription = self.broadcaster.subscribe(kind);
        let outbound = self.outbound.clone();
        let sub_id = id.clone();
        let task = tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                if outbound
                    .send(ServerMessage::next(&sub_id, &event))
                    .await
                    .is_err()
                {
                    break;
                }
            }
        });

        tracing::debug!(
            user_id = %self.principal.id,
            subscription = %id,
            event = %kind,
            "Subscription started"
        );
        self.active.insert(id, task);
    }

    async fn unsubscribe(&mut self, id: &str) {
        if let Some(task) = self.active.remove(id) {
            task.abort();
            let _ = task.await;
            tracing::debug!(user_id = %self.principal.id, subscription = %id, "Subscription stopped");
        }
        self.reply(ServerMessage::Complete { id: id.to_owned() })
            .await;
    }

    async fn reply(&self, message: ServerMessage) {
        if self.outbound.send(message).await.is_err() {
            tracing::debug!(user_id = %self.principal.id, "Outbound queue closed");
        }
    }

    /// Stops every subscription.
    pub fn close(&mut self) {
        for (_, task) in self.active.drain() {
            task.abort();
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}
