//! 行为合成验收测试
//!
//! Acceptance tests for the behavior-synthesis engine: end-to-end scenarios
//! through the public API against the recording mock executor.

mod common;

use humactor::behavior::{
    BehaviorEngine, ClickOptions, DelayWindow, MoveOptions, TypingOptions, HISTORY_CAPACITY,
};
use humactor::config::BehaviorConfig;
use humactor::input::{InputEvent, MockInputExecutor, MouseButton, Point, ScrollDirection};
use humactor::Error;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

// ============= Timing Distribution =============

#[test]
fn delay_samples_never_escape_their_window() {
    let mut rng = StdRng::seed_from_u64(11);
    let window = DelayWindow::new(0.1, 0.5).unwrap();

    for _ in 0..10_000 {
        let secs = window.sample(&mut rng).as_secs_f64();
        assert!((0.1..=0.5).contains(&secs), "sample {} escaped", secs);
    }
}

#[test]
fn inverted_delay_window_is_rejected_at_construction() {
    assert!(matches!(
        DelayWindow::new(0.5, 0.1),
        Err(Error::Configuration(_))
    ));
}

// ============= Movement Scenario =============

#[tokio::test(start_paused = true)]
async fn move_scenario_records_target_in_history() {
    let (mut engine, executor) = common::seeded_engine(1);

    let completion = engine.move_to(500, 300, MoveOptions::default()).await.unwrap();
    assert!(completion.is_finished());
    assert_eq!(executor.position().await, (500, 300));

    let pattern_entry = engine.history().entries().next().unwrap();
    assert_eq!((pattern_entry.x, pattern_entry.y), (500, 300));
}

// ============= Click Scenario =============

#[tokio::test(start_paused = true)]
async fn click_scenario_lands_near_target_with_one_primitive_click() {
    let (mut engine, executor) = common::seeded_engine(2);

    engine
        .click(Some(Point::new(100, 100)), ClickOptions::default())
        .await
        .unwrap();

    let events = executor.events().await;
    let clicks: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, InputEvent::Click(_)))
        .collect();
    assert_eq!(clicks.len(), 1);

    let (x, y) = executor.position().await;
    assert!((97..=103).contains(&x));
    assert!((97..=103).contains(&y));
}

// ============= Drag Scenario =============

#[tokio::test(start_paused = true)]
async fn drag_scenario_presses_then_traverses_then_releases() {
    let (mut engine, executor) = common::seeded_engine(3);

    engine
        .drag(Point::new(0, 0), Point::new(200, 200), None)
        .await
        .unwrap();

    let events = executor.events().await;
    let down_index = events
        .iter()
        .position(|e| matches!(e, InputEvent::MouseDown(MouseButton::Left)))
        .unwrap();
    let up_index = events
        .iter()
        .position(|e| matches!(e, InputEvent::MouseUp(MouseButton::Left)))
        .unwrap();

    // Button down before any traversal move, released only after the last
    assert!(down_index < up_index);
    assert!(events[down_index + 1..up_index]
        .iter()
        .all(|e| matches!(e, InputEvent::MoveTo { .. })));
    assert_eq!(up_index, events.len() - 1);
    assert_eq!(executor.position().await, (200, 200));
}

// ============= Typing Scenarios =============

#[tokio::test(start_paused = true)]
async fn typing_without_errors_is_exact() {
    let (mut engine, executor) = common::seeded_engine(4);

    let options = TypingOptions {
        error_probability: 0.0,
        ..Default::default()
    };
    engine.type_text("abc", options).await.unwrap();

    let keys = executor.pressed_keys().await;
    assert_eq!(keys, vec!["a", "b", "c"]);
    assert!(!keys.iter().any(|k| k == "backspace"));
}

#[tokio::test(start_paused = true)]
async fn typing_with_forced_errors_corrects_each_character() {
    let (mut engine, executor) = common::seeded_engine(5);

    let options = TypingOptions {
        error_probability: 1.0,
        correction_probability: 1.0,
        ..Default::default()
    };
    engine.type_text("hk", options).await.unwrap();

    let keys = executor.pressed_keys().await;
    // Each character becomes {neighbor, backspace, character}
    assert_eq!(keys.len(), 6);
    assert_eq!(keys[1], "backspace");
    assert_eq!(keys[2], "h");
    assert_eq!(keys[4], "backspace");
    assert_eq!(keys[5], "k");
}

// ============= Idle Scenario =============

#[tokio::test(start_paused = true)]
async fn idle_scenario_terminates_near_its_budget() {
    let (mut engine, executor) = common::seeded_engine(6);

    let started = tokio::time::Instant::now();
    let completion = engine.idle(1.0, 1.0).await.unwrap();
    let elapsed = started.elapsed().as_secs_f64();

    assert!(completion.is_finished());
    assert!(elapsed >= 1.0);
    assert!(elapsed < 6.0);
    assert!(!executor.events().await.is_empty());
}

// ============= Cancellation =============

#[tokio::test(start_paused = true)]
async fn cancellation_is_an_outcome_not_an_error() {
    let (mut engine, executor) = common::seeded_engine(7);

    engine.cancel_token().cancel();
    let completion = engine.move_to(800, 600, MoveOptions::default()).await.unwrap();
    assert!(completion.is_cancelled());
    assert!(executor.events().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn revoked_injection_surfaces_as_input_error() {
    let (mut engine, executor) = common::seeded_engine(8);

    executor.deny_injection();
    let result = engine.move_to(800, 600, MoveOptions::default()).await;
    assert!(matches!(result, Err(Error::InputInjection(_))));
}

// ============= History Bounds =============

#[tokio::test(start_paused = true)]
async fn history_is_bounded_across_many_actions() {
    let (mut engine, _executor) = common::seeded_engine(9);

    for i in 0..(HISTORY_CAPACITY as i32 + 10) {
        // Alternate far-apart targets so no move is skipped for proximity
        let x = if i % 2 == 0 { 200 } else { 900 };
        engine.move_to(x, 300 + i, MoveOptions::default()).await.unwrap();
    }

    let pattern = engine.behavior_pattern();
    assert_eq!(pattern.history_length, HISTORY_CAPACITY);
    assert_eq!(pattern.total_actions, HISTORY_CAPACITY as u64 + 10);

    // The oldest entries were evicted
    let first = engine.history().entries().next().unwrap();
    assert_eq!(first.y, 300 + 10);
}

// ============= Pattern Snapshot =============

#[tokio::test(start_paused = true)]
async fn pattern_snapshot_serializes_for_analytics() {
    let (mut engine, _executor) = common::seeded_engine(10);

    engine.move_to(500, 300, MoveOptions::default()).await.unwrap();
    engine.move_to(100, 100, MoveOptions::default()).await.unwrap();

    let pattern = engine.behavior_pattern();
    let json = serde_json::to_value(&pattern).unwrap();

    assert_eq!(json["total_actions"], 2);
    assert_eq!(json["history_length"], 2);
    assert!(json["average_speed"].as_f64().unwrap() > 0.0);
    assert!(json["last_action_time"].is_string());
}

// ============= Scroll Scenario =============

#[test]
fn scroll_scenario_emits_signed_ticks() {
    tokio_test::block_on(async {
        let (mut engine, executor) = common::seeded_engine(12);

        engine.scroll(ScrollDirection::Down, 2, None).await.unwrap();
        engine.scroll(ScrollDirection::Up, 2, None).await.unwrap();

        let deltas: Vec<i32> = executor
            .events()
            .await
            .iter()
            .filter_map(|e| match e {
                InputEvent::Scroll(delta) => Some(*delta),
                _ => None,
            })
            .collect();

        assert_eq!(deltas.len(), 4);
        assert!(deltas[..2].iter().all(|d| (-3..=-1).contains(d)));
        assert!(deltas[2..].iter().all(|d| (1..=3).contains(d)));
    });
}

// ============= Configuration Loading =============

#[test]
fn config_loads_from_toml_file() {
    let path = std::env::temp_dir().join("humactor_acceptance_config.toml");
    std::fs::write(
        &path,
        r#"
        [delays]
        min_delay = 0.02
        max_delay = 0.1

        [motion]
        speed_min = 0.2
        speed_max = 0.6

        [screen]
        width = 1920
        height = 1080
        "#,
    )
    .unwrap();

    let config = BehaviorConfig::from_file(path.to_str().unwrap()).unwrap();
    assert_eq!(config.delays.min_delay, 0.02);
    assert_eq!(config.motion.speed_max, 0.6);
    assert_eq!(config.screen.width, 1920);

    std::fs::remove_file(path).ok();
}

#[test]
fn config_file_with_inverted_range_is_rejected() {
    let path = std::env::temp_dir().join("humactor_acceptance_bad_config.toml");
    std::fs::write(
        &path,
        r#"
        [delays]
        min_delay = 0.5
        max_delay = 0.1
        "#,
    )
    .unwrap();

    let result = BehaviorConfig::from_file(path.to_str().unwrap());
    assert!(matches!(result, Err(Error::Configuration(_))));

    std::fs::remove_file(path).ok();
}

#[test]
fn env_overrides_apply() {
    std::env::set_var("HUMACTOR_SCREEN_WIDTH", "2560");
    std::env::set_var("HUMACTOR_SCREEN_HEIGHT", "1440");

    let config = BehaviorConfig::from_env().unwrap();
    assert_eq!(config.screen.width, 2560);
    assert_eq!(config.screen.height, 1440);

    std::env::remove_var("HUMACTOR_SCREEN_WIDTH");
    std::env::remove_var("HUMACTOR_SCREEN_HEIGHT");
}

// ============= Construction =============

#[test]
fn engine_rejects_invalid_profiles_up_front() {
    let mut config = BehaviorConfig::default();
    config.motion.jitter_factor = 2.0;

    let result = BehaviorEngine::new(config, Arc::new(MockInputExecutor::new()));
    assert!(matches!(result, Err(Error::Configuration(_))));
}
