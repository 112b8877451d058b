//! Match-3 engine: lifecycle, configuration and session state on top of
//! `match3-core`.
//!
//! ```
//! use match3_engine::{Engine, EngineConfig};
//! use match3_types::Phase;
//!
//! let mut engine = Engine::new(&EngineConfig::default()).unwrap();
//! let hint = engine.hint().expect("a fresh board always has a move");
//! assert!(engine.play(hint).unwrap().is_accepted());
//! assert_eq!(engine.phase(), Phase::Idle);
//! assert!(engine.session().removed_total >= 3);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod session;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{ConfigError, EngineError};
pub use session::Session;
