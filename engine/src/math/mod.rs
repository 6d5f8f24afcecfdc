//! Math helpers on top of `glam`.

pub mod random;

pub use random::{RandomExt, SeedSequence, next_seed, set_next_seed};
