// File: ./src/worker.rs
// Background actor that serves requests one at a time off the caller's task.
use crate::config::EngineConfig;
use crate::dispatcher::{Dispatcher, RequestHandler};
use crate::error::EngineError;
use crate::metrics;
use crate::protocol::{EngineEvent, Fault, Performance, Progress, Request, RequestType, Response};
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;
use uuid::Uuid;

/// Caller side of the engine. Cloneable; the worker stops once every handle is dropped.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: Sender<Request>,
}

impl EngineHandle {
    /// Queues a caller-built request. Its response arrives on the event receiver.
    pub async fn send(&self, request: Request) -> Result<()> {
        self.tx
            .send(request)
            .await
            .map_err(|_| anyhow::anyhow!("Engine worker has shut down"))
    }

    /// Queues a request under a fresh correlation id and returns that id.
    pub async fn submit(&self, kind: RequestType, payload: Value) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.send(Request::new(id.clone(), kind, payload)).await?;
        Ok(id)
    }
}

/// Spawns the engine worker with the standard dispatcher.
/// Must be called from within a tokio runtime.
pub fn spawn_engine(config: &EngineConfig) -> (EngineHandle, Receiver<EngineEvent>) {
    spawn_with_handler(Dispatcher::new(config), config.channel_capacity)
}

pub fn spawn_with_handler<H: RequestHandler>(
    handler: H,
    capacity: usize,
) -> (EngineHandle, Receiver<EngineEvent>) {
    let capacity = capacity.max(1);
    let (tx, rx) = mpsc::channel(capacity);
    let (event_tx, event_rx) = mpsc::channel(capacity);

    let actor = tokio::spawn(run_engine_actor(rx, event_tx.clone(), Arc::new(handler)));
    tokio::spawn(supervise(actor, event_tx));

    (EngineHandle { tx }, event_rx)
}

/// Serves requests until the request channel closes or nobody listens anymore.
///
/// Each request runs on the blocking pool and is awaited before the next one
/// is taken, so computations never interleave. A panicking handler still
/// produces a correlated error response.
pub async fn run_engine_actor<H: RequestHandler>(
    mut rx: Receiver<Request>,
    event_tx: Sender<EngineEvent>,
    handler: Arc<H>,
) {
    while let Some(request) = rx.recv().await {
        let started = Instant::now();
        let id = request.id.clone();
        let kind = request.kind.clone();

        let worker = handler.clone();
        let progress_tx = event_tx.clone();
        let joined = tokio::task::spawn_blocking(move || {
            let mut on_progress = |progress: f64| {
                let _ = progress_tx.blocking_send(EngineEvent::Progress(Progress::new(progress)));
            };
            worker.handle(&request, &mut on_progress)
        })
        .await;

        let response = match joined {
            Ok(response) => response,
            Err(e) => {
                let elapsed = started.elapsed();
                metrics::global().record_panic();
                metrics::global().record_request(elapsed, true);
                let error = EngineError::Panicked(join_error_message(e));
                log::error!("Request {} ({}) aborted: {}", id, kind, error);
                Response::failure(
                    &id,
                    &kind,
                    error.to_string(),
                    Performance {
                        duration_ms: elapsed.as_secs_f64() * 1000.0,
                        memory_used_bytes: 0,
                    },
                )
            }
        };

        if event_tx.send(EngineEvent::Response(response)).await.is_err() {
            log::debug!("Event receiver dropped, stopping engine worker");
            break;
        }
    }
    log::debug!("Engine worker stopped");
}

// Reports an abnormal end of the actor itself as an uncorrelated fault.
async fn supervise(actor: JoinHandle<()>, event_tx: Sender<EngineEvent>) {
    if let Err(e) = actor.await {
        let msg = join_error_message(e);
        log::error!("Engine worker terminated abnormally: {}", msg);
        let _ = event_tx
            .send(EngineEvent::Fault(Fault::new(format!(
                "Engine worker terminated: {}",
                msg
            ))))
            .await;
    }
}

fn join_error_message(e: JoinError) -> String {
    if e.is_cancelled() {
        return "task cancelled".to_string();
    }
    let payload = e.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{FAULT_ID, FAULT_TYPE};

    #[tokio::test]
    async fn dying_actor_reports_global_fault() {
        let (event_tx, mut event_rx) = mpsc::channel(4);
        let actor = tokio::spawn(async { panic!("actor exploded") });

        supervise(actor, event_tx).await;

        match event_rx.recv().await {
            Some(EngineEvent::Fault(fault)) => {
                assert_eq!(fault.id, FAULT_ID);
                assert_eq!(fault.kind, FAULT_TYPE);
                assert_eq!(fault.id, "global");
                assert_eq!(fault.kind, "ERROR");
                assert!(fault.error.contains("actor exploded"), "{}", fault.error);
            }
            other => panic!("expected a fault, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn clean_actor_exit_reports_nothing() {
        let (event_tx, mut event_rx) = mpsc::channel(4);
        let actor = tokio::spawn(async {});

        supervise(actor, event_tx).await;

        assert!(event_rx.recv().await.is_none());
    }
}
