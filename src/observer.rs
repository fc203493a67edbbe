//! Observability sink handed to the engine by its caller.
//!
//! Extraction never logs through globals directly; every notable step is an
//! [`ExtractionEvent`] sent to the observer the caller supplied. The default
//! [`LogObserver`] forwards events to the `log` facade.

use std::sync::Mutex;

use log::{debug, info, warn};

use crate::classifier::StrategyHint;
use crate::pipelines::Strategy;
use crate::validator::Rejection;

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionEvent {
    Fetched { url: String, bytes: usize },
    FetchFailed { url: String, reason: String },
    /// The primary identity was refused and the fallback identity was used
    FallbackIdentity { url: String },
    Classified { hint: StrategyHint },
    StrategyStarted { strategy: Strategy },
    NoMatch { strategy: Strategy },
    NotRecipeLike { strategy: Strategy, rejection: Rejection },
    /// A structured-data block could not be read and was skipped
    ParseSkip { reason: String },
    Accepted { strategy: Strategy },
    Exhausted,
}

pub trait ExtractionObserver: Send + Sync {
    fn on_event(&self, event: &ExtractionEvent);
}

/// Forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ExtractionObserver for LogObserver {
    fn on_event(&self, event: &ExtractionEvent) {
        match event {
            ExtractionEvent::Fetched { url, bytes } => debug!("Fetched {bytes} bytes from {url}"),
            ExtractionEvent::FetchFailed { url, reason } => warn!("Fetch of {url} failed: {reason}"),
            ExtractionEvent::FallbackIdentity { url } => {
                debug!("Primary identity refused for {url}, retrying with fallback identity")
            }
            ExtractionEvent::Classified { hint } => debug!("Page classified as {hint:?}"),
            ExtractionEvent::StrategyStarted { strategy } => debug!("Trying {strategy}"),
            ExtractionEvent::NoMatch { strategy } => debug!("{strategy} found nothing"),
            ExtractionEvent::NotRecipeLike {
                strategy,
                rejection,
            } => debug!("{strategy} candidate rejected: {rejection}"),
            ExtractionEvent::ParseSkip { reason } => debug!("Skipping structured data: {reason}"),
            ExtractionEvent::Accepted { strategy } => info!("Recipe extracted by {strategy}"),
            ExtractionEvent::Exhausted => info!("No extractable recipe found"),
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ExtractionObserver for NullObserver {
    fn on_event(&self, _event: &ExtractionEvent) {}
}

/// Keeps every event in memory, mostly useful in tests
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ExtractionEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ExtractionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Strategies in the order they were started
    pub fn strategies_tried(&self) -> Vec<Strategy> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ExtractionEvent::StrategyStarted { strategy } => Some(strategy),
                _ => None,
            })
            .collect()
    }
}

impl ExtractionObserver for RecordingObserver {
    fn on_event(&self, event: &ExtractionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
