use crate::{
    gate::{MinimumDurationGate, FLOOR_DURATION, TICK_INTERVAL},
    gemini::ImageGenerator,
    logger,
    models::{DisplayState, ErrorCause, GenerationOutcome, GenerationRequest, Prompt},
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owns the display state and runs at most one generation at a time.
///
/// Clones share the same state. Readers either poll [`state`](Self::state)
/// or [`subscribe`](Self::subscribe) to changes; only the controller writes.
#[derive(Clone)]
pub struct GenerationController {
    generator: Arc<dyn ImageGenerator>,
    state: Arc<watch::Sender<DisplayState>>,
    shutdown: Arc<watch::Sender<bool>>,
    tick: Duration,
}

impl GenerationController {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        let (state, _) = watch::channel(DisplayState::Idle);
        let (shutdown, _) = watch::channel(false);

        Self {
            generator,
            state: Arc::new(state),
            shutdown: Arc::new(shutdown),
            tick: TICK_INTERVAL,
        }
    }

    pub fn with_tick_interval(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    pub fn state(&self) -> DisplayState {
        self.state.borrow().clone()
    }

    pub fn progress(&self) -> f64 {
        self.state.borrow().progress()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.subscribe()
    }

    /// Resolves with the first state that is not `Loading`, or with the
    /// frozen state once the controller is shut down.
    pub async fn settled(&self) -> DisplayState {
        let mut rx = self.subscribe();
        tokio::select! {
            _ = rx.wait_for(|state| !state.is_loading()) => {}
            _ = shutdown_signal(self.shutdown.subscribe()) => {}
        }
        self.state()
    }

    /// Starts a generation for `raw`.
    ///
    /// Returns `None` without touching the state when the trimmed input is
    /// empty, a generation is already loading, or the controller was shut
    /// down. Otherwise the state becomes `Loading` before this returns.
    pub fn trigger(&self, raw: &str) -> Option<JoinHandle<()>> {
        let prompt = Prompt::parse(raw)?;

        if self.is_shut_down() {
            log::debug!("Ignoring trigger after shutdown");
            return None;
        }

        let accepted = self.state.send_if_modified(|state| {
            if state.is_loading() {
                false
            } else {
                *state = DisplayState::Loading { progress: 0.0 };
                true
            }
        });
        if !accepted {
            log::debug!("Ignoring trigger for '{}': generation in flight", prompt);
            return None;
        }

        let request = GenerationRequest::new(prompt);
        let gate = MinimumDurationGate::start(FLOOR_DURATION).with_tick(self.tick);
        let controller = self.clone();

        Some(tokio::spawn(async move { controller.run(request, gate).await }))
    }

    /// Stops progress updates and freezes the state. An in-flight request is
    /// left to finish on its own and its result is dropped.
    pub fn shutdown(&self) {
        if !self.shutdown.send_replace(true) {
            log::info!("Generation controller shut down");
        }
    }

    pub fn is_shut_down(&self) -> bool {
        *self.shutdown.borrow()
    }

    async fn run(&self, request: GenerationRequest, gate: MinimumDurationGate) {
        let timer = logger::timer(&format!("generation {}", request.id));
        log::info!(
            "Generation {} started for prompt '{}' via {}",
            request.id,
            request.prompt,
            self.generator.name()
        );

        let shutdown = shutdown_signal(self.shutdown.subscribe());

        let generation = async {
            GenerationOutcome::from(self.generator.generate(&request.prompt).await)
        };
        let floor = async {
            tokio::select! {
                biased;
                _ = shutdown => false,
                _ = gate.wait(|progress| self.publish_progress(progress)) => true,
            }
        };

        let (outcome, floor_reached) = tokio::join!(generation, floor);
        timer.stop();

        if !floor_reached || self.is_shut_down() {
            log::info!(
                "Discarding result of generation {} after shutdown",
                request.id
            );
            return;
        }

        self.settle(request, outcome);
    }

    fn publish_progress(&self, fraction: f64) {
        self.state.send_if_modified(|state| match state {
            DisplayState::Loading { progress } if fraction > *progress => {
                *progress = fraction;
                true
            }
            _ => false,
        });
    }

    fn settle(&self, request: GenerationRequest, outcome: GenerationOutcome) {
        let took_ms = (Utc::now() - request.started_at).num_milliseconds();
        let next = match outcome {
            GenerationOutcome::Success(image) => {
                log::info!(
                    "Generation {} produced {} bytes of {} in {}ms",
                    request.id,
                    image.size(),
                    image.mime_type,
                    took_ms
                );
                DisplayState::Result {
                    image,
                    prompt: request.prompt,
                }
            }
            GenerationOutcome::NoImage => {
                log::warn!("Generation {} returned no image after {}ms", request.id, took_ms);
                DisplayState::Error(ErrorCause::Generic)
            }
            GenerationOutcome::Failure(e) => {
                log::error!("Generation {} failed after {}ms: {}", request.id, took_ms, e);
                DisplayState::Error(ErrorCause::Connection)
            }
        };

        self.state.send_replace(next);
    }
}

/// Resolves once the shutdown flag is set or its sender is gone.
async fn shutdown_signal(mut rx: watch::Receiver<bool>) {
    while !*rx.borrow_and_update() {
        if rx.changed().await.is_err() {
            return;
        }
    }
}
