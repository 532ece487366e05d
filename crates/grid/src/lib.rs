//! Regular evaluation grids over a rectangular region.
//!
//! [`build_grid`] lays `resolution` evenly spaced points along each axis of a
//! [`Bounds`] rectangle and enumerates them row-major, rows following y:
//!
//! ```text
//!  y ▲  r=2 │ 6  7  8
//!    │  r=1 │ 3  4  5
//!    │  r=0 │ 0  1  2
//!    └──────┴─────────▶ x
//! ```
//!
//! Row 0 is the southern edge. Renderers that need north-up images flip the
//! vertical axis.

pub mod bounds;
pub mod error;
pub mod grid;

pub use bounds::Bounds;
pub use error::GridError;
pub use grid::{Grid, build_grid, linspace};
