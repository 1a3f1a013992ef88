//! Gridfall (workspace facade crate).
//!
//! Hosts depend on this package and reach the implementation crates through
//! `gridfall::{types, grid, anim, engine}`; the implementation lives in
//! dedicated crates under `crates/`.

pub use gridfall_anim as anim;
pub use gridfall_engine as engine;
pub use gridfall_grid as grid;
pub use gridfall_types as types;
