//! Idle micro-action state machine
//!
//! Fills simulated inactivity with small, purposeless actions so the input
//! stream never goes suspiciously static. The loop is time-capped and checks
//! the engine's cancellation token between iterations.

use rand::Rng;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, instrument, warn};

use super::cancel::Completion;
use super::engine::{BehaviorEngine, MoveOptions};
use crate::input::ScrollDirection;
use crate::{Error, Result};

/// Micro-actions executed during simulated inactivity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicroAction {
    /// Small pointer displacement of up to 20 px per axis
    MicroMove,
    /// Glance at a random on-screen region, then linger
    LookAround,
    /// A few scroll ticks in a random direction
    ScrollRandom,
    /// Ctrl+Tab to a neighboring tab, then linger
    SwitchTabs,
}

impl MicroAction {
    /// Uniform selection over all variants; there is no preferred initial state
    fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..4) {
            0 => MicroAction::MicroMove,
            1 => MicroAction::LookAround,
            2 => MicroAction::ScrollRandom,
            _ => MicroAction::SwitchTabs,
        }
    }
}

impl BehaviorEngine {
    /// Simulate inactivity for a duration drawn once from `[min, max]` seconds
    ///
    /// Repeatedly executes one micro-action and sleeps a random inter-action
    /// interval until the budget is exhausted or the engine is cancelled. An
    /// in-flight micro-action runs to its end, so the elapsed time can exceed
    /// the budget by one action.
    #[instrument(skip(self))]
    pub async fn idle(&mut self, min_duration: f64, max_duration: f64) -> Result<Completion> {
        if !min_duration.is_finite()
            || !max_duration.is_finite()
            || min_duration <= 0.0
            || min_duration > max_duration
        {
            return Err(Error::configuration(format!(
                "idle window must satisfy 0 < min <= max, got {}..{}",
                min_duration, max_duration
            )));
        }

        let target =
            Duration::from_secs_f64(self.rng.gen_range(min_duration..=max_duration));
        debug!("idling for {:.1}s", target.as_secs_f64());
        let started = Instant::now();

        while started.elapsed() < target {
            if self.cancel.is_cancelled() {
                warn!(
                    "idle cancelled after {:.1}s",
                    started.elapsed().as_secs_f64()
                );
                return Ok(Completion::Cancelled);
            }

            let action = MicroAction::pick(&mut self.rng);
            if self.run_micro_action(action).await?.is_cancelled() {
                return Ok(Completion::Cancelled);
            }

            let pause = self.rng.gen_range(0.5..=2.0);
            sleep(Duration::from_secs_f64(pause)).await;
        }

        debug!("idle finished after {:.1}s", started.elapsed().as_secs_f64());
        Ok(Completion::Finished)
    }

    async fn run_micro_action(&mut self, action: MicroAction) -> Result<Completion> {
        debug!("micro-action {:?}", action);

        match action {
            MicroAction::MicroMove => {
                let (x, y) = self.executor.current_position().await?;
                let offset_x = self.rng.gen_range(-20..=20);
                let offset_y = self.rng.gen_range(-20..=20);
                self.move_to(x + offset_x, y + offset_y, MoveOptions::default())
                    .await
            }
            MicroAction::LookAround => {
                let margin_x = (self.screen.width / 10).min(100);
                let margin_y = (self.screen.height / 10).min(100);
                let x = self.rng.gen_range(margin_x..=self.screen.width - margin_x);
                let y = self.rng.gen_range(margin_y..=self.screen.height - margin_y);

                let completion = self.move_to(x, y, MoveOptions::default()).await?;
                if completion.is_cancelled() {
                    return Ok(completion);
                }

                let linger = self.rng.gen_range(0.3..=1.0);
                sleep(Duration::from_secs_f64(linger)).await;
                Ok(Completion::Finished)
            }
            MicroAction::ScrollRandom => {
                let direction = if self.rng.gen_bool(0.5) {
                    ScrollDirection::Up
                } else {
                    ScrollDirection::Down
                };
                let clicks = self.rng.gen_range(1..=3);
                self.scroll(direction, clicks, None).await
            }
            MicroAction::SwitchTabs => {
                let completion = self.hotkey(&["ctrl", "tab"]).await?;
                if completion.is_cancelled() {
                    return Ok(completion);
                }

                let linger = self.rng.gen_range(0.5..=1.5);
                sleep(Duration::from_secs_f64(linger)).await;
                Ok(Completion::Finished)
            }
        }
    }
}
