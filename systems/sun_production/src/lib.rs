#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Timers that rain ambient sun on the lawn and trigger sunflower bursts.

use lawn_defence_core::{Command, EconomyConfig, Event};

/// Pure system that turns elapsed time into sun drop commands.
#[derive(Debug)]
pub struct SunProduction {
    ambient_interval_ms: u64,
    burst_interval_ms: u64,
    ambient_elapsed_ms: u64,
    burst_elapsed_ms: u64,
}

impl SunProduction {
    /// Creates a sun production system paced by the economy settings.
    #[must_use]
    pub fn new(economy: &EconomyConfig) -> Self {
        Self {
            ambient_interval_ms: economy.ambient_interval_ms,
            burst_interval_ms: economy.sunflower_burst_interval_ms,
            ambient_elapsed_ms: 0,
            burst_elapsed_ms: 0,
        }
    }

    /// Time accumulated towards the next ambient drop.
    #[must_use]
    pub const fn ambient_elapsed_ms(&self) -> u64 {
        self.ambient_elapsed_ms
    }

    /// Time accumulated towards the next sunflower burst.
    #[must_use]
    pub const fn burst_elapsed_ms(&self) -> u64 {
        self.burst_elapsed_ms
    }

    /// Consumes world events and the number of live sunflowers to emit drops.
    ///
    /// The burst timer only runs while at least one sunflower is planted and
    /// starts over from zero whenever the lawn has none.
    pub fn handle(&mut self, events: &[Event], sunflowers: usize, out: &mut Vec<Command>) {
        let elapsed_ms = events
            .iter()
            .filter_map(|event| match event {
                Event::TimeAdvanced { dt, .. } => {
                    Some(u64::try_from(dt.as_millis()).unwrap_or(u64::MAX))
                }
                _ => None,
            })
            .fold(0u64, u64::saturating_add);
        if elapsed_ms == 0 {
            return;
        }

        self.ambient_elapsed_ms = self.ambient_elapsed_ms.saturating_add(elapsed_ms);
        if self.ambient_interval_ms > 0 && self.ambient_elapsed_ms >= self.ambient_interval_ms {
            self.ambient_elapsed_ms = 0;
            out.push(Command::DropAmbientSun);
        }

        if sunflowers == 0 {
            self.burst_elapsed_ms = 0;
            return;
        }

        self.burst_elapsed_ms = self.burst_elapsed_ms.saturating_add(elapsed_ms);
        if self.burst_interval_ms > 0 && self.burst_elapsed_ms >= self.burst_interval_ms {
            self.burst_elapsed_ms = 0;
            tracing::debug!(sunflowers, "sunflower burst");
            out.push(Command::DropSunflowerSun);
        }
    }
}
