//! Polyomino simulation engine: pure, deterministic, and host-driven.
//!
//! This crate owns the falling-shape game: spawn, player-driven movement and
//! rotation with wall kicks, gravity, stabilization, full-row clearing with
//! shape fragmentation, scoring, and game over. It has no I/O and no clock;
//! the host delivers discrete commands and gravity ticks, then queries shapes
//! (and advances their animation channels) once per rendered frame.
//!
//! # Module structure
//!
//! - [`config`]: per-instance board/spawn/animation configuration
//! - [`shapes`]: keyed tetromino and pentomino footprint tables
//! - [`mino`]: one shape (footprint, pivot, seams, presentation)
//! - [`game`]: the engine itself (commands, gravity, clears, events)
//! - [`rng`]: deterministic LCG for shape choice, rotations, colors
//! - [`snapshot`]: serializable observation of the whole engine
//!
//! # Example
//!
//! ```
//! use gridfall_engine::{Command, Engine, EngineConfig, ShapeTable};
//!
//! let mut game = Engine::new(EngineConfig::default(), ShapeTable::Pentomino).unwrap();
//! game.set_routine("UXU");
//! game.reset();
//!
//! game.apply(Command::MoveLeft);
//! game.apply(Command::Rotate);
//! game.apply(Command::StepDown);
//!
//! assert!(game.control().is_some());
//! assert!(!game.is_over());
//! ```

pub mod config;
pub mod game;
pub mod mino;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use config::{ConfigError, EngineConfig};
pub use game::{Command, Engine, Event};
pub use mino::{CellBuf, Mino};
pub use rng::SimpleRng;
pub use shapes::{ShapeSpec, ShapeTable, MAX_SHAPE_CELLS, PENTOMINOES, TETROMINOES};
pub use snapshot::{EngineSnapshot, ShapeSnapshot, ShapeState};
