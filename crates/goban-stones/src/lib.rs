//! Stone separation and grid inference for Go board photos.
//!
//! The pipeline per stone color is:
//! 1. [`separate_stones`]: split touching stones in a binary mask with a
//!    seeded watershed and measure each region by its minimal enclosing
//!    circle;
//! 2. [`infer_stone_grid`]: snap the candidates of both colors onto a
//!    calibrated [`goban_grid::BoardModel`] and drop black stones that
//!    collide with white ones ([`resolve_duplicates`]).
//!
//! The result is a [`BoardState`].

mod enclosing;
mod infer;
mod params;
mod resolve;
mod seeds;
mod separate;
mod state;
mod watershed;

pub use enclosing::minimal_enclosing_circle;
pub use infer::{infer_stone_grid, InferenceReport, StoneGridInference};
pub use params::SeparationParams;
pub use resolve::{resolve_duplicates, ResolvedGrids};
pub use seeds::{resolve_seeds, spiral_offsets, ResolvedSeed, SeedResolution};
pub use separate::{separate_stones, StoneSeparation};
pub use state::BoardState;
pub use watershed::{watershed, LabelMap};
