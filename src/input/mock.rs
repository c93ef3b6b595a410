//! Mock input executor for testing
//!
//! This module provides a recording implementation of the executor trait so
//! behavior synthesis can be exercised without touching a real input device.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::input::traits::*;
use crate::Error;

/// A single recorded input primitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer moved to absolute coordinates
    MoveTo { x: i32, y: i32 },
    /// Button pressed
    MouseDown(MouseButton),
    /// Button released
    MouseUp(MouseButton),
    /// Button clicked
    Click(MouseButton),
    /// Wheel scrolled by a signed delta
    Scroll(i32),
    /// Key pressed and released
    KeyPress(String),
    /// Key pressed and held
    KeyDown(String),
    /// Key released
    KeyUp(String),
}

/// Mock input executor
///
/// Records every primitive call in order and tracks the pointer position.
/// Failure modes can be simulated with [`deny_injection`](Self::deny_injection)
/// (every call fails, as when the OS revokes the injection permission) or
/// [`fail_after`](Self::fail_after) (the first `n` calls succeed).
#[derive(Debug)]
pub struct MockInputExecutor {
    events: Arc<Mutex<Vec<InputEvent>>>,
    position: Arc<Mutex<(i32, i32)>>,
    denied: AtomicBool,
    calls: AtomicUsize,
    fail_after: AtomicUsize,
}

impl MockInputExecutor {
    /// Create a new mock executor with the pointer at the origin
    pub fn new() -> Self {
        Self::at(0, 0)
    }

    /// Create a new mock executor with the pointer at a given position
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            position: Arc::new(Mutex::new((x, y))),
            denied: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            fail_after: AtomicUsize::new(usize::MAX),
        }
    }

    /// Simulate the OS revoking the injection permission
    pub fn deny_injection(&self) {
        self.denied.store(true, Ordering::Relaxed);
    }

    /// Let the next `n` primitive calls succeed, then fail every call
    pub fn fail_after(&self, n: usize) {
        self.fail_after.store(n, Ordering::Relaxed);
    }

    /// Snapshot of all recorded events, in call order
    pub async fn events(&self) -> Vec<InputEvent> {
        self.events.lock().await.clone()
    }

    /// Keys emitted via `key_press`, in call order
    pub async fn pressed_keys(&self) -> Vec<String> {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|event| match event {
                InputEvent::KeyPress(key) => Some(key.clone()),
                _ => None,
            })
            .collect()
    }

    /// Current tracked pointer position
    pub async fn position(&self) -> (i32, i32) {
        *self.position.lock().await
    }

    async fn record(&self, event: InputEvent) -> Result<(), Error> {
        if self.denied.load(Ordering::Relaxed) {
            return Err(Error::input_injection("injection permission revoked"));
        }

        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        if call >= self.fail_after.load(Ordering::Relaxed) {
            return Err(Error::input_injection("injection backend unavailable"));
        }

        self.events.lock().await.push(event);
        Ok(())
    }
}

impl Default for MockInputExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InputExecutor for MockInputExecutor {
    async fn move_to(&self, x: i32, y: i32) -> Result<(), Error> {
        self.record(InputEvent::MoveTo { x, y }).await?;
        *self.position.lock().await = (x, y);
        Ok(())
    }

    async fn mouse_down(&self, button: MouseButton) -> Result<(), Error> {
        self.record(InputEvent::MouseDown(button)).await
    }

    async fn mouse_up(&self, button: MouseButton) -> Result<(), Error> {
        self.record(InputEvent::MouseUp(button)).await
    }

    async fn click(&self, button: MouseButton) -> Result<(), Error> {
        self.record(InputEvent::Click(button)).await
    }

    async fn scroll(&self, delta: i32) -> Result<(), Error> {
        self.record(InputEvent::Scroll(delta)).await
    }

    async fn key_press(&self, key: &str) -> Result<(), Error> {
        self.record(InputEvent::KeyPress(key.to_string())).await
    }

    async fn key_down(&self, key: &str) -> Result<(), Error> {
        self.record(InputEvent::KeyDown(key.to_string())).await
    }

    async fn key_up(&self, key: &str) -> Result<(), Error> {
        self.record(InputEvent::KeyUp(key.to_string())).await
    }

    async fn current_position(&self) -> Result<(i32, i32), Error> {
        if self.denied.load(Ordering::Relaxed) {
            return Err(Error::input_injection("injection permission revoked"));
        }
        Ok(*self.position.lock().await)
    }
}
