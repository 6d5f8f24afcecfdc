//! Benchmark utilities for rusty_scene.
//!
//! - **Microbenchmarks**: overlap queries, singleton access, spawn/destroy, random sampling
//! - **Scenario benchmarks**: full engine frames of a mine field with moving ships
//! - **Frame timing**: per-frame statistics for engine runs
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p rusty_scene_bench
//!
//! # Run a specific benchmark group
//! cargo bench -p rusty_scene_bench -- overlap
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports.

pub mod fixtures;
pub mod frame_timer;
pub mod scenario;
