use std::any::Any;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::core::{Simulation, Surface};
use crate::time::{Clock, FixedStep, LoopStats, MonotonicClock};

use super::{EngineConfig, EngineError, LoopState};

/// Sleep increment of the frame-rate throttle.
const THROTTLE_GRANULARITY: Duration = Duration::from_millis(1);

const LOOP_THREAD_NAME: &str = "game-loop";

/// Fixed-update / variable-render loop driver.
///
/// Owns the simulation and the clock, opens the surface on the loop thread and
/// runs `init → loop → cleanup` there:
///
/// ```text
/// dt = clock.elapsed(); acc += dt
/// simulation.input(surface)
/// while acc >= interval { simulation.update(interval); acc -= interval }
/// simulation.render(surface); surface.present()
/// throttle unless the surface syncs presentation
/// ```
///
/// ```rust,ignore
/// GameEngine::<WindowSurface, _>::new(WindowConfig::default(), MyGame::default())
///     .with_config(EngineConfig::default())
///     .start()?;
/// ```
pub struct GameEngine<Surf, Sim, C = MonotonicClock>
where
    Surf: Surface,
{
    surface_config: Option<Surf::Config>,
    simulation: Sim,
    clock: C,
    config: EngineConfig,
    state: LoopState,

    frames: u64,
    updates: u64,

    _surface: PhantomData<fn() -> Surf>,
}

impl<Surf, Sim> GameEngine<Surf, Sim, MonotonicClock>
where
    Surf: Surface,
    Sim: Simulation<Surf>,
{
    pub fn new(surface_config: Surf::Config, simulation: Sim) -> Self {
        Self {
            surface_config: Some(surface_config),
            simulation,
            clock: MonotonicClock::new(),
            config: EngineConfig::default(),
            state: LoopState::Uninitialized,
            frames: 0,
            updates: 0,
            _surface: PhantomData,
        }
    }
}

impl<Surf, Sim, C> GameEngine<Surf, Sim, C>
where
    Surf: Surface,
    Sim: Simulation<Surf>,
    C: Clock,
{
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the time source, e.g. with a `ManualClock` for deterministic runs.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> GameEngine<Surf, Sim, C2> {
        GameEngine {
            surface_config: self.surface_config,
            simulation: self.simulation,
            clock,
            config: self.config,
            state: self.state,
            frames: self.frames,
            updates: self.updates,
            _surface: PhantomData,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn simulation(&self) -> &Sim {
        &self.simulation
    }

    pub fn into_simulation(self) -> Sim {
        self.simulation
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Loop iterations completed (each rendered exactly once).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Fixed updates executed.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Runs the engine to completion and returns how it ended.
    ///
    /// Uses a dedicated `game-loop` thread unless `run_on_calling_thread` is set;
    /// either way this call blocks until the loop has terminated.
    pub fn start(self) -> Result<(), EngineError>
    where
        Surf: 'static,
        Surf::Config: Send + 'static,
        Sim: Send + 'static,
        C: Send + 'static,
    {
        if self.config.run_on_calling_thread {
            let mut engine = self;
            return engine.run();
        }

        let handle = self.spawn()?;
        handle
            .join()
            .map_err(|payload| EngineError::Thread(panic_message(payload)))?
    }

    /// Moves the engine onto a new `game-loop` thread and returns its handle.
    ///
    /// The caller stays free while the loop runs; joining yields the run result.
    pub fn spawn(self) -> Result<JoinHandle<Result<(), EngineError>>, EngineError>
    where
        Surf: 'static,
        Surf::Config: Send + 'static,
        Sim: Send + 'static,
        C: Send + 'static,
    {
        thread::Builder::new()
            .name(LOOP_THREAD_NAME.to_string())
            .spawn(move || {
                let mut engine = self;
                engine.run()
            })
            .map_err(|e| EngineError::Thread(format!("failed to spawn: {e}")))
    }

    /// Runs `init → loop → cleanup` on the current thread.
    ///
    /// Cleanup always runs once the engine has started initializing, including
    /// after a panic in the surface or the simulation, which is reported as
    /// `EngineError::Thread`. A cleanup failure is returned only when nothing
    /// failed before it.
    pub fn run(&mut self) -> Result<(), EngineError> {
        if self.state != LoopState::Uninitialized {
            return Err(EngineError::Startup(anyhow::anyhow!(
                "engine cannot start while {}",
                self.state
            )));
        }

        self.transition(LoopState::Initializing);

        let mut surface = None;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| match self.init(&mut surface) {
            Ok(open) => {
                self.transition(LoopState::Running);
                self.game_loop(open).map_err(EngineError::Runtime)
            }
            Err(err) => Err(EngineError::Startup(err)),
        }))
        .unwrap_or_else(|payload| Err(EngineError::Thread(panic_message(payload))));

        self.transition(LoopState::ShuttingDown);
        let cleanup = self.cleanup(surface.as_mut());
        drop(surface);
        self.transition(LoopState::Terminated);

        log::info!(
            "game loop finished after {} frames / {} updates",
            self.frames,
            self.updates
        );

        match (outcome, cleanup) {
            (Err(err), _) => Err(err),
            (Ok(()), Err(err)) => Err(EngineError::Cleanup(err)),
            (Ok(()), Ok(())) => Ok(()),
        }
    }

    fn init<'s>(&mut self, slot: &'s mut Option<Surf>) -> Result<&'s mut Surf> {
        self.config
            .loop_config
            .validate()
            .context("invalid loop configuration")?;

        let config = self
            .surface_config
            .take()
            .context("surface configuration already consumed")?;

        let surface = slot.insert(Surf::open(config).context("failed to open surface")?);
        self.clock.init();
        self.simulation
            .init(surface)
            .context("simulation init failed")?;

        Ok(surface)
    }

    fn game_loop(&mut self, surface: &mut Surf) -> Result<()> {
        let loop_config = self.config.loop_config;
        let mut steps = FixedStep::new(loop_config.update_interval());
        let mut stats = self.config.stats_interval.map(LoopStats::new);

        log::info!(
            "game loop running: {} updates/s, {}",
            loop_config.updates_per_second,
            if surface.syncs_presentation() {
                "presentation-synced".to_string()
            } else {
                format!("capped at {} frames/s", loop_config.frames_per_second)
            }
        );

        let mut running = !surface.close_requested();
        while running {
            steps.accumulate(self.clock.elapsed());

            self.simulation.input(surface).context("input failed")?;

            let simulation = &mut self.simulation;
            let updates = steps
                .drain(|interval| simulation.update(interval))
                .context("update failed")?;

            self.simulation.render(surface).context("render failed")?;
            surface.present().context("present failed")?;

            if !surface.syncs_presentation() {
                self.throttle(loop_config.frame_slot());
            }

            self.frames += 1;
            self.updates += u64::from(updates);
            log::trace!(
                "frame {}: {updates} updates, {:.4}s carried",
                self.frames,
                steps.accumulator()
            );

            if let Some(snapshot) = stats
                .as_mut()
                .and_then(|s| s.record(self.clock.now(), updates))
            {
                log::debug!("{:.1} fps, {:.1} ups", snapshot.fps, snapshot.ups);
            }

            running = !surface.close_requested();
        }

        Ok(())
    }

    /// Sleeps in coarse increments until one frame slot has passed since the last poll.
    fn throttle(&mut self, frame_slot: f64) {
        let end = self.clock.last_poll_time() + frame_slot;
        while self.clock.now() < end {
            self.clock.sleep(THROTTLE_GRANULARITY);
        }
    }

    fn cleanup(&mut self, surface: Option<&mut Surf>) -> Result<()> {
        let mut first = None;

        if let Err(err) = self.simulation.cleanup() {
            let err = err.context("simulation cleanup failed");
            log::error!("{err:#}");
            first = Some(err);
        }

        if let Some(surface) = surface {
            if let Err(err) = surface.teardown() {
                let err = err.context("surface teardown failed");
                log::error!("{err:#}");
                first.get_or_insert(err);
            }
        }

        first.map_or(Ok(()), Err)
    }

    fn transition(&mut self, next: LoopState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal loop transition {} -> {}",
            self.state,
            next
        );
        log::debug!("game loop: {} -> {}", self.state, next);
        self.state = next;
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_are_readable() {
        assert_eq!(panic_message(Box::new("boom")), "panicked: boom");
        assert_eq!(panic_message(Box::new(String::from("lost"))), "panicked: lost");
        assert_eq!(panic_message(Box::new(42_u8)), "panicked");
    }
}
