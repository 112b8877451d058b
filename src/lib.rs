//! Match-3 board engine (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `match3::{core, engine, types}` and carries the headless
//! demo binary.

pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_types as types;
