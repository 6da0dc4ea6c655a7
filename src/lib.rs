// Library surface for the binary and for headless/integration tests.
// Terminal rendering stays in the binary (main.rs + ui).
pub mod app_dirs;
pub mod attempt;
pub mod attempt_log;
pub mod config;
pub mod language;
pub mod navigation;
pub mod runtime;
pub mod scoring;
pub mod task;
pub mod typing_policy;
pub mod word_generator;

pub use runtime::TICK_RATE_MS;
