// File: ./src/dispatcher.rs
// Routes a decoded request to the matching component and wraps the outcome.
use crate::batch::BatchProcessor;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::metrics;
use crate::model::{RecurrenceEngine, calculate_overlaps, optimize_layout, search_events};
use crate::protocol::{
    CalculateOverlapsPayload, GenerateRecurringPayload, OptimizeLayoutPayload, Performance,
    ProcessEventsPayload, Request, RequestType, Response, SearchEventsPayload,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::str::FromStr;
use std::time::Instant;

/// Anything that can answer a request. The worker runs one of these per request.
pub trait RequestHandler: Send + Sync + 'static {
    fn handle(&self, request: &Request, on_progress: &mut dyn FnMut(f64)) -> Response;
}

#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    batch: BatchProcessor,
}

fn decode<T: DeserializeOwned>(kind: RequestType, payload: &Value) -> Result<T, EngineError> {
    T::deserialize(payload).map_err(|e| EngineError::InvalidPayload {
        kind: kind.to_string(),
        reason: e.to_string(),
    })
}

fn encode<T: Serialize>(value: &T) -> Result<Value, EngineError> {
    Ok(serde_json::to_value(value)?)
}

impl Dispatcher {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            batch: BatchProcessor::from_config(config),
        }
    }

    /// Handles one request to completion. Never fails: every error becomes
    /// an error response carrying the request id and timing.
    pub fn dispatch(&self, request: &Request, on_progress: &mut dyn FnMut(f64)) -> Response {
        let started = Instant::now();
        let memory_before = metrics::resident_memory_bytes();

        let outcome = self.route(request, on_progress);

        let elapsed = started.elapsed();
        let performance = Performance {
            duration_ms: elapsed.as_secs_f64() * 1000.0,
            memory_used_bytes: metrics::resident_memory_bytes().saturating_sub(memory_before),
        };
        metrics::global().record_request(elapsed, outcome.is_err());

        match outcome {
            Ok(result) => {
                log::debug!(
                    "{} {} done in {:.2}ms",
                    request.kind,
                    request.id,
                    performance.duration_ms
                );
                Response::success(&request.id, &request.kind, result, performance)
            }
            Err(e) => {
                if let EngineError::UnknownType(_) = e {
                    metrics::global().record_unknown_type();
                }
                log::warn!("Request {} ({}) failed: {}", request.id, request.kind, e);
                Response::failure(&request.id, &request.kind, e.to_string(), performance)
            }
        }
    }

    fn route(
        &self,
        request: &Request,
        on_progress: &mut dyn FnMut(f64),
    ) -> Result<Value, EngineError> {
        let kind = RequestType::from_str(&request.kind)
            .map_err(|_| EngineError::UnknownType(request.kind.clone()))?;

        match kind {
            RequestType::ProcessEvents => {
                let p: ProcessEventsPayload = decode(kind, &request.payload)?;
                let outcome = self.batch.process(p.events, &p.options, |pct| on_progress(pct));
                encode(&outcome)
            }
            RequestType::CalculateOverlaps => {
                let p: CalculateOverlapsPayload = decode(kind, &request.payload)?;
                encode(&calculate_overlaps(&p.events, &p.date_range))
            }
            RequestType::GenerateRecurring => {
                let p: GenerateRecurringPayload = decode(kind, &request.payload)?;
                encode(&RecurrenceEngine::generate(
                    &p.base_event,
                    &p.pattern,
                    &p.date_range,
                ))
            }
            RequestType::SearchEvents => {
                let p: SearchEventsPayload = decode(kind, &request.payload)?;
                encode(&search_events(&p.events, &p.query, &p.options))
            }
            RequestType::OptimizeLayout => {
                let p: OptimizeLayoutPayload = decode(kind, &request.payload)?;
                encode(&optimize_layout(&p.events, p.container_width))
            }
        }
    }
}

impl RequestHandler for Dispatcher {
    fn handle(&self, request: &Request, on_progress: &mut dyn FnMut(f64)) -> Response {
        self.dispatch(request, on_progress)
    }
}
