// Poller - glue between the query client and the event channel
//
// One poll = fetch, classify, broadcast. The scheduler drives this from
// its tick loop (awaiting completion, so scheduled polls never
// overlap); the TUI's manual-refresh key spawns an extra poll that may
// race a scheduled one. Last response to arrive wins - an accepted
// race, not something this layer serializes.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::events::WidgetEvent;
use crate::query::{ScalarQueryClient, ScalarOutcome};

pub struct Poller {
    client: ScalarQueryClient,
    server_url: String,
    expression: String,
    tx: mpsc::Sender<WidgetEvent>,
}

impl Poller {
    pub fn new(
        client: ScalarQueryClient,
        server_url: String,
        expression: String,
        tx: mpsc::Sender<WidgetEvent>,
    ) -> Self {
        Self {
            client,
            server_url,
            expression,
            tx,
        }
    }

    /// Whether a request is outstanding (for the busy indicator).
    pub fn request_in_flight(&self) -> bool {
        self.client.request_in_flight()
    }

    /// Run one poll cycle and broadcast the result.
    pub async fn poll(&self) {
        let outcome = self
            .client
            .fetch_scalar(&self.server_url, &self.expression)
            .await;

        if let ScalarOutcome::QueryError(message) | ScalarOutcome::UnsupportedType(message) =
            &outcome
        {
            tracing::warn!("{}", message);
        }

        for event in WidgetEvent::from_outcome(outcome) {
            // A closed channel means the widget was torn down while the
            // fetch was outstanding; drop the response quietly.
            if self.tx.send(event).await.is_err() {
                return;
            }
        }
    }

    /// Fire-and-forget poll for user-initiated refresh.
    pub fn spawn_poll(self: &Arc<Self>) {
        let poller = Arc::clone(self);
        tokio::spawn(async move {
            poller.poll().await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_expression_broadcasts_a_clean_slate() {
        let (tx, mut rx) = mpsc::channel(8);
        let poller = Poller::new(
            ScalarQueryClient::new(reqwest::Client::new()),
            "http://localhost:9090".to_string(),
            String::new(),
            tx,
        );

        poller.poll().await;
        assert_eq!(rx.recv().await, Some(WidgetEvent::Errors(Vec::new())));
    }

    #[tokio::test]
    async fn late_response_after_teardown_is_dropped() {
        let (tx, rx) = mpsc::channel(8);
        let poller = Poller::new(
            ScalarQueryClient::new(reqwest::Client::new()),
            "http://localhost:9090".to_string(),
            String::new(),
            tx,
        );

        // Receiver gone before the poll completes
        drop(rx);
        poller.poll().await; // must not panic
    }

    #[tokio::test]
    async fn unreachable_server_broadcasts_error_messages() {
        let (tx, mut rx) = mpsc::channel(8);
        let poller = Poller::new(
            ScalarQueryClient::new(reqwest::Client::new()),
            "http://192.0.2.1:1".to_string(),
            "up".to_string(),
            tx,
        );

        poller.poll().await;
        match rx.recv().await {
            Some(WidgetEvent::Errors(messages)) => {
                assert_eq!(messages.len(), 1);
                assert!(messages[0].contains("up"));
            }
            other => panic!("expected Errors, got {:?}", other),
        }
    }
}
