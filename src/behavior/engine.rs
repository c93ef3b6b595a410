//! Behavior engine
//!
//! The public facade of the crate: composes the timing model, path
//! synthesizer, and error-injection model into humanized composite actions,
//! issuing primitives through the injected executor and pacing them with
//! timed sleeps. Operations take `&mut self`, so one engine instance can only
//! ever run one action at a time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use super::cancel::{CancelToken, Completion};
use super::history::{ActionHistory, BehaviorPattern};
use super::keyboard::{self, KeyStroke};
use super::path::{self, MOVE_TOLERANCE};
use super::timing::{DelayWindow, TimingModel};
use crate::config::{BehaviorConfig, MotionProfile, ScreenGeometry};
use crate::input::{InputExecutor, MouseButton, Point, ScrollDirection};
use crate::{Error, Result};

/// Probability of a mid-sentence hesitation pause while typing
const HESITATION_PROBABILITY: f64 = 0.05;

/// Control points of the curve traversed while dragging
const DRAG_CONTROL_POINTS: usize = 3;

/// Pointer movement options
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOptions {
    /// Total traversal time in seconds; drawn from the motion profile's
    /// speed window when unset
    pub speed: Option<f64>,

    /// Curvature override for this movement only
    pub curve_factor: Option<f64>,
}

/// Click options
#[derive(Debug, Clone, Copy)]
pub struct ClickOptions {
    /// Button to click
    pub button: MouseButton,

    /// Double-click with a short gap between the two clicks
    pub double: bool,

    /// Explicit landing offset from the target; a bounded random offset of
    /// up to 3 px per axis is drawn when unset
    pub offset: Option<(i32, i32)>,
}

impl Default for ClickOptions {
    fn default() -> Self {
        Self {
            button: MouseButton::Left,
            double: false,
            offset: None,
        }
    }
}

/// Typing options
#[derive(Debug, Clone, Copy)]
pub struct TypingOptions {
    /// Minimum inter-key delay in seconds
    pub min_delay: f64,

    /// Maximum inter-key delay in seconds
    pub max_delay: f64,

    /// Probability of mistyping a character as a keyboard neighbor
    pub error_probability: f64,

    /// Probability of correcting a mistyped character
    pub correction_probability: f64,
}

impl Default for TypingOptions {
    fn default() -> Self {
        Self {
            min_delay: 0.05,
            max_delay: 0.3,
            error_probability: 0.01,
            correction_probability: 0.8,
        }
    }
}

impl TypingOptions {
    fn validate(&self) -> Result<DelayWindow> {
        for (name, value) in [
            ("error_probability", self.error_probability),
            ("correction_probability", self.correction_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        DelayWindow::new(self.min_delay, self.max_delay)
    }
}

/// Behavior engine
///
/// Construct with an immutable [`BehaviorConfig`] and an executor; the
/// configuration is validated up front and never re-read. All randomness
/// flows through one injected seedable source.
pub struct BehaviorEngine {
    pub(super) executor: Arc<dyn InputExecutor>,
    pub(super) timing: TimingModel,
    pub(super) motion: MotionProfile,
    pub(super) screen: ScreenGeometry,
    pub(super) rng: StdRng,
    pub(super) history: ActionHistory,
    pub(super) cancel: CancelToken,
}

impl BehaviorEngine {
    /// Create an engine with an entropy-seeded random source
    pub fn new(config: BehaviorConfig, executor: Arc<dyn InputExecutor>) -> Result<Self> {
        Self::with_rng(config, executor, StdRng::from_entropy())
    }

    /// Create an engine with an explicit random source, for reproducible runs
    pub fn with_rng(
        config: BehaviorConfig,
        executor: Arc<dyn InputExecutor>,
        rng: StdRng,
    ) -> Result<Self> {
        config.validate()?;
        let timing = TimingModel::from_profile(&config.delays)?;

        info!(
            "behavior engine initialized, screen {}x{}",
            config.screen.width, config.screen.height
        );

        Ok(Self {
            executor,
            timing,
            motion: config.motion,
            screen: config.screen,
            rng,
            history: ActionHistory::new(),
            cancel: CancelToken::new(),
        })
    }

    /// Handle for cancelling in-flight long-running actions
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Recorded action history, oldest entry first
    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    /// Derived behavior statistics for diagnostic consumers
    pub fn behavior_pattern(&self) -> BehaviorPattern {
        self.history.pattern()
    }

    /// Move the pointer to `(x, y)` along a humanized path
    ///
    /// Skips entirely when the pointer is already within tolerance of the
    /// target. Appends one history entry per logical call, at the requested
    /// final position.
    #[instrument(skip(self))]
    pub async fn move_to(&mut self, x: i32, y: i32, options: MoveOptions) -> Result<Completion> {
        let mut motion = self.motion.clone();
        if let Some(curve_factor) = options.curve_factor {
            motion.curve_factor = curve_factor;
            motion.validate()?;
        }
        let speed = match options.speed {
            Some(speed) if speed.is_finite() && speed > 0.0 => Some(speed),
            Some(speed) => {
                return Err(Error::configuration(format!(
                    "speed must be positive, got {}",
                    speed
                )))
            }
            None => None,
        };

        let (current_x, current_y) = self.executor.current_position().await?;
        if (current_x - x).abs() < MOVE_TOLERANCE && (current_y - y).abs() < MOVE_TOLERANCE {
            debug!("pointer already near ({}, {}), skipping move", x, y);
            return Ok(Completion::Finished);
        }

        let reaction = self.timing.reaction_delay(&mut self.rng);
        sleep(reaction).await;

        let start = Point::new(current_x, current_y);
        let target = Point::new(x, y);
        let motion_path = path::synthesize(&mut self.rng, start, target, &motion);

        let speed = speed
            .unwrap_or_else(|| self.rng.gen_range(motion.speed_min..motion.speed_max));
        let interval = speed / motion_path.len() as f64;

        for (index, point) in motion_path.points().iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!(
                    "move to ({}, {}) cancelled after {} of {} points",
                    x,
                    y,
                    index,
                    motion_path.len()
                );
                return Ok(Completion::Cancelled);
            }

            self.executor.move_to(point.x, point.y).await?;

            // Per-segment sleep randomized so consecutive intervals differ
            if index + 1 < motion_path.len() {
                let factor = self.rng.gen_range(0.8..=1.2);
                sleep(Duration::from_secs_f64(interval * factor)).await;
            }
        }

        self.history.record(x, y);
        debug!(
            "pointer moved to ({}, {}) via {:?} path of {} points",
            x,
            y,
            motion_path.kind(),
            motion_path.len()
        );
        Ok(Completion::Finished)
    }

    /// Click at the current position, or move to `target` first
    ///
    /// When a target is given without an explicit offset, a bounded random
    /// offset of up to 3 px per axis models imprecise aim.
    pub async fn click(
        &mut self,
        target: Option<Point>,
        options: ClickOptions,
    ) -> Result<Completion> {
        if let Some(point) = target {
            let (offset_x, offset_y) = options.offset.unwrap_or_else(|| {
                (self.rng.gen_range(-3..=3), self.rng.gen_range(-3..=3))
            });
            let completion = self
                .move_to(point.x + offset_x, point.y + offset_y, MoveOptions::default())
                .await?;
            if completion.is_cancelled() {
                return Ok(Completion::Cancelled);
            }
        }

        let reaction = self.timing.reaction_delay(&mut self.rng);
        sleep(reaction).await;

        self.executor.click(options.button).await?;
        if options.double {
            let gap = self.rng.gen_range(0.1..=0.3);
            sleep(Duration::from_secs_f64(gap)).await;
            self.executor.click(options.button).await?;
        }

        let think = self.timing.think_delay(&mut self.rng);
        sleep(think).await;

        debug!(
            "{}{} click at {:?}",
            if options.double { "double " } else { "" },
            options.button.as_str(),
            target
        );
        Ok(Completion::Finished)
    }

    /// Type `text` with humanized cadence and occasional injected typos
    ///
    /// Characters are emitted in input order, modulo injected error and
    /// backspace keys. Options are validated before the first key is sent.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn type_text(&mut self, text: &str, options: TypingOptions) -> Result<Completion> {
        let window = options.validate()?;
        let total = text.chars().count();

        for (index, ch) in text.chars().enumerate() {
            if self.cancel.is_cancelled() {
                warn!("typing cancelled after {} of {} characters", index, total);
                return Ok(Completion::Cancelled);
            }

            let strokes = keyboard::keystrokes_for_char(
                &mut self.rng,
                ch,
                options.error_probability,
                options.correction_probability,
            );

            for (stroke_index, stroke) in strokes.iter().enumerate() {
                match stroke {
                    KeyStroke::Char(c) => self.executor.key_press(&c.to_string()).await?,
                    KeyStroke::Backspace => self.executor.key_press("backspace").await?,
                }

                let is_final_key = index + 1 == total && stroke_index + 1 == strokes.len();
                if !is_final_key {
                    sleep(window.sample(&mut self.rng)).await;
                }
            }

            // Occasional longer pause, as if thinking mid-sentence
            if self.rng.gen_bool(HESITATION_PROBABILITY) {
                let pause = self.rng.gen_range(0.2..=0.8);
                sleep(Duration::from_secs_f64(pause)).await;
            }
        }

        debug!("typed {} characters", total);
        Ok(Completion::Finished)
    }

    /// Scroll `clicks` ticks in `direction`, optionally moving to `at` first
    ///
    /// Each tick has a random 1-3 magnitude so scroll distance does not
    /// repeat exactly.
    pub async fn scroll(
        &mut self,
        direction: ScrollDirection,
        clicks: u32,
        at: Option<Point>,
    ) -> Result<Completion> {
        if let Some(point) = at {
            let completion = self.move_to(point.x, point.y, MoveOptions::default()).await?;
            if completion.is_cancelled() {
                return Ok(Completion::Cancelled);
            }
        }

        for tick in 0..clicks {
            if self.cancel.is_cancelled() {
                warn!("scroll cancelled after {} of {} ticks", tick, clicks);
                return Ok(Completion::Cancelled);
            }

            let magnitude = self.rng.gen_range(1..=3);
            self.executor.scroll(magnitude * direction.signum()).await?;

            if tick + 1 < clicks {
                let delay = self.rng.gen_range(0.2..=0.8);
                sleep(Duration::from_secs_f64(delay)).await;
            }
        }

        debug!("scrolled {} ticks {}", clicks, direction.as_str());
        Ok(Completion::Finished)
    }

    /// Drag from `start` to `end` with the left button held
    ///
    /// The pointer approaches `start` as a normal move, presses down,
    /// traverses a curved path, and releases. The button is released before
    /// returning when the traversal is cancelled mid-way.
    pub async fn drag(
        &mut self,
        start: Point,
        end: Point,
        duration: Option<f64>,
    ) -> Result<Completion> {
        let duration = match duration {
            Some(secs) if secs.is_finite() && secs > 0.0 => secs,
            Some(secs) => {
                return Err(Error::configuration(format!(
                    "drag duration must be positive, got {}",
                    secs
                )))
            }
            None => self.rng.gen_range(0.5..=1.5),
        };

        let completion = self.move_to(start.x, start.y, MoveOptions::default()).await?;
        if completion.is_cancelled() {
            return Ok(Completion::Cancelled);
        }

        let settle = self.rng.gen_range(0.1..=0.3);
        sleep(Duration::from_secs_f64(settle)).await;
        self.executor.mouse_down(MouseButton::Left).await?;

        let points = path::curved_points(&mut self.rng, start, end, DRAG_CONTROL_POINTS);
        let interval = duration / points.len() as f64;

        for (index, point) in points.iter().enumerate() {
            if self.cancel.is_cancelled() {
                self.executor.mouse_up(MouseButton::Left).await?;
                warn!(
                    "drag cancelled after {} of {} points, button released",
                    index,
                    points.len()
                );
                return Ok(Completion::Cancelled);
            }

            self.executor.move_to(point.x, point.y).await?;
            let factor = self.rng.gen_range(0.8..=1.2);
            sleep(Duration::from_secs_f64(interval * factor)).await;
        }

        let settle = self.rng.gen_range(0.1..=0.3);
        sleep(Duration::from_secs_f64(settle)).await;
        self.executor.mouse_up(MouseButton::Left).await?;

        self.history.record(end.x, end.y);
        debug!(
            "dragged from ({}, {}) to ({}, {})",
            start.x, start.y, end.x, end.y
        );
        Ok(Completion::Finished)
    }

    /// Press a named key `presses` times
    ///
    /// Gaps between presses use `interval` when given, otherwise a fresh
    /// random 0.1-0.5 s draw per gap.
    pub async fn press_key(
        &mut self,
        key: &str,
        presses: u32,
        interval: Option<f64>,
    ) -> Result<Completion> {
        if let Some(secs) = interval {
            if !secs.is_finite() || secs < 0.0 {
                return Err(Error::configuration(format!(
                    "key interval must be non-negative, got {}",
                    secs
                )));
            }
        }

        for press in 0..presses {
            if self.cancel.is_cancelled() {
                warn!("key presses cancelled after {} of {}", press, presses);
                return Ok(Completion::Cancelled);
            }

            self.executor.key_press(key).await?;

            if press + 1 < presses {
                let gap = interval.unwrap_or_else(|| self.rng.gen_range(0.1..=0.5));
                sleep(Duration::from_secs_f64(gap)).await;
            }
        }

        debug!("pressed {} {} times", key, presses);
        Ok(Completion::Finished)
    }

    /// Press a hotkey chord such as `["ctrl", "c"]`
    ///
    /// Modifiers go down in order with small gaps, the final key is pressed,
    /// then the modifiers are released in reverse order.
    pub async fn hotkey(&mut self, keys: &[&str]) -> Result<Completion> {
        let (last, modifiers) = keys
            .split_last()
            .ok_or_else(|| Error::configuration("hotkey requires at least one key"))?;

        for modifier in modifiers {
            self.executor.key_down(modifier).await?;
            let gap = self.rng.gen_range(0.05..=0.15);
            sleep(Duration::from_secs_f64(gap)).await;
        }

        self.executor.key_press(last).await?;
        let gap = self.rng.gen_range(0.05..=0.15);
        sleep(Duration::from_secs_f64(gap)).await;

        for modifier in modifiers.iter().rev() {
            self.executor.key_up(modifier).await?;
            let gap = self.rng.gen_range(0.05..=0.15);
            sleep(Duration::from_secs_f64(gap)).await;
        }

        debug!("hotkey {}", keys.join("+"));
        Ok(Completion::Finished)
    }
}

impl std::fmt::Debug for BehaviorEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorEngine")
            .field("motion", &self.motion)
            .field("screen", &self.screen)
            .field("history_len", &self.history.len())
            .finish()
    }
}
