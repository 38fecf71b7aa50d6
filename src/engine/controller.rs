// Step engine controller

use crate::config::{Settings, MAX_DELAY_MS, MIN_ELEMENTS};
use crate::engine::control::RunHandle;
use crate::engine::errors::SortError;
use crate::sequence::{Arrangement, BarColor, Extent, Presenter, Sequence};
use crate::sorts::{Algorithm, SortOrder, Step, StepMachine};
use log::{debug, error, info, warn};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use std::time::{Duration, Instant};

/// Counters for the current (or last) sort
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub algorithm: Option<Algorithm>,
    pub steps: u64,
    /// Steps that compared two elements
    pub comparisons: u64,
    pub swaps: u64,
    pub placements: u64,
    pub completed: bool,
}

impl Stats {
    fn started(algorithm: Algorithm) -> Self {
        Stats {
            algorithm: Some(algorithm),
            ..Stats::default()
        }
    }

    fn record(&mut self, step: &Step) {
        self.steps += 1;
        if step.is_comparison() {
            self.comparisons += 1;
        }
        if step.is_swap() {
            self.swaps += 1;
        }
        if matches!(step, Step::Placed { .. }) {
            self.placements += 1;
        }
    }
}

/// Why [`Controller::run_to_completion`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Paused,
    Killed,
}

/// Owns the sequence and the active step machine
pub struct Controller {
    sequence: Sequence,
    machine: Option<Box<dyn StepMachine>>,
    control: RunHandle,
    delay: Duration,
    order: SortOrder,
    arrangement: Arrangement,
    rng: Pcg32,
    stats: Stats,
    /// When the auto-run tick last stepped; `None` steps on the next tick
    last_tick: Option<Instant>,
    last_step: Option<Step>,
}

impl Controller {
    /// Create a controller and build the initial sequence from `settings`.
    ///
    /// A size that does not fit `extent` is reduced to the widest one that does.
    pub fn new(
        settings: &Settings,
        extent: Extent,
        presenter: Box<dyn Presenter>,
    ) -> Result<Self, SortError> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        info!("Engine seed: {}", seed);

        let mut controller = Controller {
            sequence: Sequence::new(extent, presenter),
            machine: None,
            control: RunHandle::new(true),
            delay: Duration::from_millis(settings.delay_ms.min(MAX_DELAY_MS)),
            order: settings.order,
            arrangement: settings.arrangement,
            rng: Pcg32::seed_from_u64(seed),
            stats: Stats::default(),
            last_tick: None,
            last_step: None,
        };

        let width = extent.width as usize;
        let size = if settings.size > width && width >= MIN_ELEMENTS {
            warn!(
                "Size {} does not fit {} columns, using {}",
                settings.size, width, width
            );
            width
        } else {
            settings.size
        };
        controller.build(size, settings.arrangement)?;
        Ok(controller)
    }

    /// Rebuild the sequence with `size` elements. Any active sort is discarded.
    ///
    /// On error the previous sequence and sort are kept.
    pub fn build(&mut self, size: usize, arrangement: Arrangement) -> Result<(), SortError> {
        if let Err(e) = self.sequence.build(size, arrangement, &mut self.rng) {
            warn!("Rejected build: {}", e);
            return Err(e);
        }
        self.discard("sequence rebuilt");
        self.arrangement = arrangement;
        self.stats = Stats::default();
        self.last_step = None;
        info!("Built {} elements ({})", size, arrangement.as_str());
        Ok(())
    }

    /// Rebuild at the current size
    pub fn regenerate(&mut self, arrangement: Arrangement) -> Result<(), SortError> {
        self.build(self.count(), arrangement)
    }

    pub fn shuffle(&mut self) -> Result<(), SortError> {
        self.regenerate(Arrangement::Random)
    }

    /// Start `algorithm` on the current sequence, paused
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        self.discard("new algorithm selected");
        self.sequence.recolor_all(BarColor::Normal);
        let seed = self.rng.next_u64();
        self.machine = Some(algorithm.start(&mut self.sequence, self.order, seed));
        self.stats = Stats::started(algorithm);
        self.last_step = None;
        info!(
            "Selected {} ({}, {} elements)",
            algorithm.name(),
            self.order.as_str(),
            self.count()
        );
    }

    /// Flip between paused and auto-running, returning whether it is now paused
    pub fn toggle_pause(&mut self) -> Result<bool, SortError> {
        if self.machine.is_none() {
            return Err(SortError::NoActiveSort);
        }
        let paused = self.control.toggle();
        if !paused {
            self.last_tick = None;
        }
        Ok(paused)
    }

    pub fn pause(&mut self) {
        self.control.pause();
    }

    pub fn resume(&mut self) -> Result<(), SortError> {
        if self.machine.is_none() {
            return Err(SortError::NoActiveSort);
        }
        self.last_tick = None;
        self.control.resume();
        Ok(())
    }

    /// Perform exactly one step, ignoring the delay
    pub fn single_step(&mut self) -> Result<Step, SortError> {
        self.step_once()
    }

    /// Auto-run tick for event loops: step once if running and the delay has
    /// passed since the previous tick.
    pub fn advance_due(&mut self, now: Instant) -> Result<Option<Step>, SortError> {
        if self.control.take_kill_request() {
            self.kill();
            return Ok(None);
        }
        if self.machine.is_none() || self.control.is_paused() {
            return Ok(None);
        }
        if let Some(last) = self.last_tick {
            if now.saturating_duration_since(last) < self.delay {
                return Ok(None);
            }
        }
        self.last_tick = Some(now);
        self.step_once().map(Some)
    }

    /// Time until [`advance_due`](Self::advance_due) would step, if running
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        if self.machine.is_none() || self.control.is_paused() {
            return None;
        }
        Some(match self.last_tick {
            Some(last) => self
                .delay
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        })
    }

    /// Resume and step with the configured delay until the sort completes, or
    /// until a [`RunHandle`] pauses or kills it.
    pub fn run_to_completion(&mut self) -> Result<RunOutcome, SortError> {
        self.resume()?;
        loop {
            if self.control.take_kill_request() {
                self.kill();
                return Ok(RunOutcome::Killed);
            }
            if self.machine.is_none() {
                return Ok(RunOutcome::Completed);
            }
            if self.control.is_paused() {
                return Ok(RunOutcome::Paused);
            }
            if !self.control.wait(self.delay) {
                continue;
            }
            self.step_once()?;
        }
    }

    /// Perform every remaining step immediately, returning how many were taken
    pub fn finish(&mut self) -> Result<u64, SortError> {
        if self.machine.is_none() {
            return Err(SortError::NoActiveSort);
        }
        let before = self.stats.steps;
        while self.machine.is_some() {
            self.step_once()?;
        }
        Ok(self.stats.steps - before)
    }

    /// Discard the active sort and pause
    pub fn kill(&mut self) {
        self.discard("killed");
        self.control.take_kill_request();
    }

    fn discard(&mut self, reason: &str) {
        if let Some(machine) = self.machine.take() {
            info!(
                "Discarded {} after {} steps: {}",
                machine.algorithm().name(),
                self.stats.steps,
                reason
            );
        }
        self.control.pause();
        self.last_tick = None;
    }

    fn step_once(&mut self) -> Result<Step, SortError> {
        let Some(machine) = self.machine.as_mut() else {
            return Err(SortError::NoActiveSort);
        };
        let algorithm = machine.algorithm();

        if machine.generation() != self.sequence.generation() || !machine.has_next_step() {
            error!(
                "{} is stale (generation {} vs {}), aborting",
                algorithm.name(),
                machine.generation(),
                self.sequence.generation()
            );
            self.kill();
            return Err(SortError::StaleStepMachine { algorithm });
        }

        let step = machine.next_step(&mut self.sequence);
        let finished = !machine.has_next_step();

        self.stats.record(&step);
        self.last_step = Some(step);
        debug!("{} step {}: {}", algorithm.name(), self.stats.steps, step.describe());

        if finished {
            self.stats.completed = true;
            self.machine = None;
            self.control.pause();
            info!(
                "{} finished: {} steps, {} comparisons, {} swaps",
                algorithm.name(),
                self.stats.steps,
                self.stats.comparisons,
                self.stats.swaps
            );
        }
        Ok(step)
    }

    /// Lay the sequence out for a new display size; the active sort continues
    pub fn relayout(&mut self, extent: Extent) -> Result<(), SortError> {
        self.sequence.relayout(extent).inspect_err(|e| {
            warn!(
                "Cannot lay out {} elements in {}x{}: {}",
                self.sequence.len(),
                extent.width,
                extent.height,
                e
            )
        })
    }

    pub fn set_delay(&mut self, millis: u64) {
        self.delay = Duration::from_millis(millis.min(MAX_DELAY_MS));
        debug!("Delay set to {:?}", self.delay);
    }

    /// Current delay in milliseconds
    pub fn delay(&self) -> u64 {
        self.delay.as_millis() as u64
    }

    /// Order used by the next selected algorithm
    pub fn set_order(&mut self, order: SortOrder) {
        self.order = order;
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn count(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_paused(&self) -> bool {
        self.control.is_paused()
    }

    /// Whether a sort is active and has steps left
    pub fn has_next_step(&self) -> bool {
        self.machine.as_ref().is_some_and(|m| m.has_next_step())
    }

    /// Algorithm of the active sort
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.machine.as_ref().map(|m| m.algorithm())
    }

    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn last_step(&self) -> Option<Step> {
        self.last_step
    }

    /// Handle for pausing or killing from another thread
    pub fn handle(&self) -> RunHandle {
        self.control.clone()
    }
}
