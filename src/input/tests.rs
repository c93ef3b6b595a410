//! Input layer tests

use super::mock::{InputEvent, MockInputExecutor};
use super::traits::*;
use crate::Error;

#[tokio::test]
async fn mock_records_events_in_order() {
    let executor = MockInputExecutor::new();

    executor.move_to(10, 20).await.unwrap();
    executor.mouse_down(MouseButton::Left).await.unwrap();
    executor.mouse_up(MouseButton::Left).await.unwrap();
    executor.scroll(-2).await.unwrap();
    executor.key_press("enter").await.unwrap();

    let events = executor.events().await;
    assert_eq!(
        events,
        vec![
            InputEvent::MoveTo { x: 10, y: 20 },
            InputEvent::MouseDown(MouseButton::Left),
            InputEvent::MouseUp(MouseButton::Left),
            InputEvent::Scroll(-2),
            InputEvent::KeyPress("enter".to_string()),
        ]
    );
}

#[tokio::test]
async fn mock_tracks_pointer_position() {
    let executor = MockInputExecutor::at(5, 5);
    assert_eq!(executor.current_position().await.unwrap(), (5, 5));

    executor.move_to(300, 400).await.unwrap();
    assert_eq!(executor.current_position().await.unwrap(), (300, 400));
}

#[tokio::test]
async fn denied_injection_fails_every_call() {
    let executor = MockInputExecutor::new();
    executor.deny_injection();

    let result = executor.click(MouseButton::Left).await;
    assert!(matches!(result, Err(Error::InputInjection(_))));

    let result = executor.current_position().await;
    assert!(matches!(result, Err(Error::InputInjection(_))));
}

#[tokio::test]
async fn fail_after_lets_early_calls_through() {
    let executor = MockInputExecutor::new();
    executor.fail_after(2);

    executor.key_press("a").await.unwrap();
    executor.key_press("b").await.unwrap();
    let result = executor.key_press("c").await;
    assert!(matches!(result, Err(Error::InputInjection(_))));

    assert_eq!(executor.pressed_keys().await, vec!["a", "b"]);
}

#[test]
fn button_and_direction_names_are_stable() {
    assert_eq!(MouseButton::Left.as_str(), "left");
    assert_eq!(MouseButton::Right.as_str(), "right");
    assert_eq!(MouseButton::Middle.as_str(), "middle");
    assert_eq!(ScrollDirection::Up.as_str(), "up");
    assert_eq!(ScrollDirection::Down.as_str(), "down");
}

#[test]
fn scroll_direction_signum() {
    assert_eq!(ScrollDirection::Up.signum(), 1);
    assert_eq!(ScrollDirection::Down.signum(), -1);
}

#[test]
fn point_distance() {
    let a = Point::new(0, 0);
    let b = Point::new(3, 4);
    assert_eq!(a.distance_to(b), 5.0);
}
