//! Common test utilities
//!
//! This module provides shared test helpers and fixtures for all integration tests.

use humactor::behavior::BehaviorEngine;
use humactor::config::BehaviorConfig;
use humactor::input::MockInputExecutor;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Initialize tracing once for the whole test binary
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Build a deterministic engine over a fresh recording executor
pub fn seeded_engine(seed: u64) -> (BehaviorEngine, Arc<MockInputExecutor>) {
    init_tracing();
    let executor = Arc::new(MockInputExecutor::new());
    let engine = BehaviorEngine::with_rng(
        BehaviorConfig::default(),
        executor.clone(),
        StdRng::seed_from_u64(seed),
    )
    .expect("default config is valid");
    (engine, executor)
}
