//! Network actor - runs lookups in the Tokio async runtime

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::error::LookupError;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::Outcome;
use crate::network::client::{execute_lookup, Fetch};

/// Network actor that runs one worker task per lookup
pub struct NetworkActor<F: Fetch> {
    fetcher: Arc<F>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl<F: Fetch> NetworkActor<F> {
    pub fn new(fetcher: F, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            fetcher: Arc::new(fetcher),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Lookup { id, word }) => {
                            let response_tx = self.response_tx.clone();
                            let fetcher = Arc::clone(&self.fetcher);

                            self.active_requests.spawn(async move {
                                tracing::info!(id, word = %word, "Executing lookup");
                                let response = run_guarded(fetcher, id, word).await;
                                let NetworkResponse::Completed { outcome, time_ms, .. } = &response;
                                tracing::info!(id, outcome = outcome.kind(), time_ms, "Lookup completed");
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

/// Run a lookup on its own task so a panic still yields an outcome
async fn run_guarded<F: Fetch>(fetcher: Arc<F>, id: u64, word: String) -> NetworkResponse {
    let start = Instant::now();
    let task_word = word.clone();

    match tokio::spawn(async move { execute_lookup(fetcher.as_ref(), id, task_word).await }).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(id, error = %e, "Lookup worker died");
            NetworkResponse::Completed {
                id,
                word,
                outcome: Outcome::Failed(LookupError::Worker(e.to_string())),
                time_ms: start.elapsed().as_millis() as u64,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SchemaError, TransportError};
    use async_trait::async_trait;
    use std::time::Duration;

    /// Canned responses, optionally delayed, keyed by word
    struct FakeFetch;

    #[async_trait]
    impl Fetch for FakeFetch {
        async fn fetch(&self, word: &str) -> Result<Vec<u8>, TransportError> {
            match word {
                "slow" => {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    Ok(br#"[{"def":[{"sseq":[[["sense",{"dt":[["text","slow"]]}]]]}]}]"#.to_vec())
                }
                "cta" => Ok(br#"["cat","act"]"#.to_vec()),
                "teapot" => Err(TransportError::Status(418)),
                "garbage" => Ok(b"<html>".to_vec()),
                "boom" => panic!("fetcher exploded"),
                _ => Ok(b"[]".to_vec()),
            }
        }
    }

    async fn run_one(word: &str) -> NetworkResponse {
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        tokio::spawn(NetworkActor::new(FakeFetch, resp_tx).run(cmd_rx));

        cmd_tx
            .send(NetworkCommand::Lookup { id: 7, word: word.to_string() })
            .unwrap();
        let response = tokio::time::timeout(Duration::from_secs(5), resp_rx.recv())
            .await
            .unwrap()
            .unwrap();
        let _ = cmd_tx.send(NetworkCommand::Shutdown);
        response
    }

    #[tokio::test]
    async fn test_suggestions_outcome() {
        let NetworkResponse::Completed { id, word, outcome, .. } = run_one("cta").await;
        assert_eq!(id, 7);
        assert_eq!(word, "cta");
        assert!(matches!(outcome, Outcome::Suggestions(s) if s.0 == vec!["cat", "act"]));
    }

    #[tokio::test]
    async fn test_transport_error_outcome() {
        let NetworkResponse::Completed { outcome, .. } = run_one("teapot").await;
        assert!(matches!(
            outcome,
            Outcome::Failed(LookupError::Transport(TransportError::Status(418)))
        ));
    }

    #[tokio::test]
    async fn test_schema_error_outcome() {
        let NetworkResponse::Completed { outcome, .. } = run_one("garbage").await;
        assert!(matches!(
            outcome,
            Outcome::Failed(LookupError::Schema(SchemaError::Json(_)))
        ));
    }

    #[tokio::test]
    async fn test_panicking_worker_still_completes() {
        let NetworkResponse::Completed { id, outcome, .. } = run_one("boom").await;
        assert_eq!(id, 7);
        assert!(matches!(outcome, Outcome::Failed(LookupError::Worker(_))));
    }

    #[tokio::test]
    async fn test_overlapping_lookups_each_complete_once() {
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        tokio::spawn(NetworkActor::new(FakeFetch, resp_tx).run(cmd_rx));

        cmd_tx.send(NetworkCommand::Lookup { id: 1, word: "slow".into() }).unwrap();
        cmd_tx.send(NetworkCommand::Lookup { id: 2, word: "fast".into() }).unwrap();

        let first = resp_rx.recv().await.unwrap();
        let second = resp_rx.recv().await.unwrap();
        assert_eq!((first.id(), second.id()), (2, 1));

        let _ = cmd_tx.send(NetworkCommand::Shutdown);
        let extra = tokio::time::timeout(Duration::from_millis(300), resp_rx.recv()).await;
        assert!(!matches!(extra, Ok(Some(_))));
    }
}
