#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave director that paces announcements, spawns and wave completion.

use lawn_defence_core::{Command, Event, WaveNumber, WaveTable, WaveTiming};

/// Stage of the wave cycle the director is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No tick has been handled yet.
    Idle,
    /// The current wave's announcement is on screen.
    Announcing,
    /// Enemies of the current wave are being released.
    Spawning,
    /// Every enemy was released; waiting for the lawn to clear.
    AwaitingClear,
    /// Pause between a cleared wave and the next announcement.
    Intermission,
    /// The final wave was cleared.
    Victory,
    /// The round was lost; the director stays silent.
    Halted,
}

/// Pure system that drives wave progression from world events.
#[derive(Debug)]
pub struct WaveDirector {
    timing: WaveTiming,
    phase: Phase,
    wave: WaveNumber,
    phase_elapsed_ms: u64,
    spawned: u32,
    active_enemies: u32,
    announcement: Option<String>,
}

impl WaveDirector {
    /// Creates a director that will open with the first wave.
    #[must_use]
    pub fn new(timing: WaveTiming) -> Self {
        Self {
            timing,
            phase: Phase::Idle,
            wave: WaveNumber::FIRST,
            phase_elapsed_ms: 0,
            spawned: 0,
            active_enemies: 0,
            announcement: None,
        }
    }

    /// Current phase of the wave cycle.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Wave currently announced, spawning or awaiting clearance.
    #[must_use]
    pub const fn wave(&self) -> WaveNumber {
        self.wave
    }

    /// Number of enemies of the current wave released so far.
    #[must_use]
    pub const fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Enemies believed to be alive according to the observed events.
    #[must_use]
    pub const fn active_enemies(&self) -> u32 {
        self.active_enemies
    }

    /// Announcement text while an announcement is visible.
    #[must_use]
    pub fn announcement(&self) -> Option<&str> {
        self.announcement.as_deref()
    }

    /// Whole seconds left before the next wave is announced, during an intermission.
    #[must_use]
    pub fn countdown_seconds(&self) -> Option<u64> {
        if self.phase != Phase::Intermission {
            return None;
        }
        let remaining = self
            .timing
            .intermission_ms
            .saturating_sub(self.phase_elapsed_ms);
        Some(remaining.div_ceil(1_000))
    }

    /// Consumes world events and the live enemy count to emit wave commands.
    ///
    /// Completion is never evaluated in the same call that released the last
    /// enemy of a wave; that enemy's spawn event arrives with the next batch.
    pub fn handle(
        &mut self,
        events: &[Event],
        waves: &WaveTable,
        live_enemies: usize,
        out: &mut Vec<Command>,
    ) {
        let mut elapsed_ms = 0u64;
        let mut ticked = false;
        for event in events {
            match event {
                Event::TimeAdvanced { dt, .. } => {
                    ticked = true;
                    let millis = u64::try_from(dt.as_millis()).unwrap_or(u64::MAX);
                    elapsed_ms = elapsed_ms.saturating_add(millis);
                }
                Event::EnemySpawned { .. } => {
                    self.active_enemies = self.active_enemies.saturating_add(1);
                }
                Event::EnemyKilled { .. } | Event::EnemyReachedGoal { .. } => {
                    self.active_enemies = self.active_enemies.saturating_sub(1);
                }
                Event::GameOver => self.halt(),
                Event::LevelComplete { .. } => self.phase = Phase::Victory,
                _ => {}
            }
        }

        if !ticked || matches!(self.phase, Phase::Victory | Phase::Halted) {
            return;
        }

        match self.phase {
            Phase::Idle => self.announce(WaveNumber::FIRST, waves, out),
            Phase::Announcing => {
                self.phase_elapsed_ms = self.phase_elapsed_ms.saturating_add(elapsed_ms);
                if self.phase_elapsed_ms >= self.timing.announcement_ms {
                    self.begin_spawning(waves, out);
                }
            }
            Phase::Spawning => {
                self.phase_elapsed_ms = self.phase_elapsed_ms.saturating_add(elapsed_ms);
                self.continue_spawning(waves, out);
            }
            Phase::AwaitingClear => self.check_completion(waves, live_enemies, out),
            Phase::Intermission => {
                self.phase_elapsed_ms = self.phase_elapsed_ms.saturating_add(elapsed_ms);
                if self.phase_elapsed_ms >= self.timing.intermission_ms {
                    self.announce(self.wave.next(), waves, out);
                }
            }
            Phase::Victory | Phase::Halted => {}
        }
    }

    fn announce(&mut self, wave: WaveNumber, waves: &WaveTable, out: &mut Vec<Command>) {
        let Some(settings) = waves.get(wave) else {
            self.declare_victory(out);
            return;
        };

        let text = settings.announcement(wave);
        tracing::info!(wave = wave.get(), announcement = %text, "wave announced");
        self.wave = wave;
        self.phase = Phase::Announcing;
        self.phase_elapsed_ms = 0;
        self.spawned = 0;
        self.announcement = Some(text);
    }

    fn begin_spawning(&mut self, waves: &WaveTable, out: &mut Vec<Command>) {
        let Some(settings) = waves.get(self.wave) else {
            self.declare_victory(out);
            return;
        };

        self.announcement = None;
        self.phase = Phase::Spawning;
        self.phase_elapsed_ms = 0;
        tracing::info!(
            wave = self.wave.get(),
            enemies = settings.enemy_count,
            "wave spawning"
        );

        out.push(Command::SpawnEnemy { wave: self.wave });
        self.spawned = 1;
        if self.spawned >= settings.enemy_count {
            self.phase = Phase::AwaitingClear;
        }
    }

    fn continue_spawning(&mut self, waves: &WaveTable, out: &mut Vec<Command>) {
        let Some(settings) = waves.get(self.wave) else {
            self.declare_victory(out);
            return;
        };

        let interval = settings.spawn_interval_ms.max(1);
        while self.spawned < settings.enemy_count && self.phase_elapsed_ms >= interval {
            self.phase_elapsed_ms -= interval;
            out.push(Command::SpawnEnemy { wave: self.wave });
            self.spawned += 1;
        }

        if self.spawned >= settings.enemy_count {
            self.phase = Phase::AwaitingClear;
            self.phase_elapsed_ms = 0;
        }
    }

    fn check_completion(&mut self, waves: &WaveTable, live_enemies: usize, out: &mut Vec<Command>) {
        let total = waves
            .get(self.wave)
            .map_or(0, |settings| settings.enemy_count);
        if live_enemies > 0 || self.active_enemies > 0 || self.spawned < total {
            return;
        }

        out.push(Command::CompleteWave { wave: self.wave });
        if waves.get(self.wave.next()).is_none() {
            self.declare_victory(out);
            return;
        }

        tracing::info!(wave = self.wave.get(), "wave cleared, intermission started");
        self.phase = Phase::Intermission;
        self.phase_elapsed_ms = 0;
    }

    fn declare_victory(&mut self, out: &mut Vec<Command>) {
        tracing::info!(wave = self.wave.get(), "no further waves configured");
        self.announcement = None;
        self.phase = Phase::Victory;
        out.push(Command::DeclareVictory);
    }

    fn halt(&mut self) {
        if self.phase != Phase::Halted {
            tracing::debug!(wave = self.wave.get(), "wave director halted");
        }
        self.announcement = None;
        self.phase = Phase::Halted;
    }
}
