//! Input executor layer traits
//!
//! This module defines the abstract interface for OS-level input injection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Mouse button selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button
    Left,
    /// Secondary button
    Right,
    /// Wheel button
    Middle,
}

impl MouseButton {
    /// Stable lowercase name, as understood by common injection backends
    pub fn as_str(&self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
        }
    }
}

impl Default for MouseButton {
    fn default() -> Self {
        MouseButton::Left
    }
}

/// Scroll direction selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    /// Scroll content up (positive wheel delta)
    Up,
    /// Scroll content down (negative wheel delta)
    Down,
}

impl ScrollDirection {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollDirection::Up => "up",
            ScrollDirection::Down => "down",
        }
    }

    /// Sign of the wheel delta for this direction
    pub fn signum(&self) -> i32 {
        match self {
            ScrollDirection::Up => 1,
            ScrollDirection::Down => -1,
        }
    }
}

/// Integer screen coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate in pixels
    pub x: i32,
    /// Vertical coordinate in pixels
    pub y: i32,
}

impl Point {
    /// Create a point from pixel coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

/// Input executor trait
///
/// The only component permitted to emit OS-level pointer/keyboard events and
/// query the current pointer position. Implementations must return
/// [`crate::Error::InputInjection`] when the OS denies or cannot perform an
/// injection (permission revoked, display disconnected, and so on).
#[async_trait]
pub trait InputExecutor: Send + Sync + std::fmt::Debug {
    /// Move the pointer to absolute screen coordinates
    async fn move_to(&self, x: i32, y: i32) -> Result<(), crate::Error>;

    /// Press and hold a mouse button
    async fn mouse_down(&self, button: MouseButton) -> Result<(), crate::Error>;

    /// Release a held mouse button
    async fn mouse_up(&self, button: MouseButton) -> Result<(), crate::Error>;

    /// Press and release a mouse button at the current position
    async fn click(&self, button: MouseButton) -> Result<(), crate::Error>;

    /// Scroll by a signed wheel delta (positive is up)
    async fn scroll(&self, delta: i32) -> Result<(), crate::Error>;

    /// Press and release a named key
    async fn key_press(&self, key: &str) -> Result<(), crate::Error>;

    /// Press and hold a named key
    async fn key_down(&self, key: &str) -> Result<(), crate::Error>;

    /// Release a held key
    async fn key_up(&self, key: &str) -> Result<(), crate::Error>;

    /// Current pointer position
    async fn current_position(&self) -> Result<(i32, i32), crate::Error>;
}
