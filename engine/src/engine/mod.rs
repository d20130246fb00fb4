// engine/src/engine/mod.rs
#![forbid(unsafe_code)]

mod assets;
mod boundary;
mod circuit;
mod constants;
mod emitter;
mod error;
mod geometry;
mod grid;
mod sampler;
mod search;

/**
 * Curated engine public API.
 *
 * Internal implementation modules remain private; only stable items are re-exported here.
 */
pub use assets::{AssetCatalog, AssetId, MiddleWire, RailWire};
pub use boundary::{
    is_aligned_with_rail, is_inside_boundary, is_inside_boundary_code, rail_hole_to_column,
};
pub use circuit::{Circuit, Segment, SegmentRole};
pub use constants::{
    BOTTOM_RAIL_ROW, GAP_ROWS, H, HALF_H, MAX_ANCHOR_LEN, MAX_COL, MAX_MIDDLE_LEN, MAX_ROW,
    MIN_ANCHOR_LEN, MIN_MIDDLE_LEN, RAIL_HOLES, TOP_RAIL_ROW, W,
};
pub use emitter::{PlacementRecord, emit, physical_row};
pub use error::CircuitError;
pub use geometry::{Direction, Half, Hole};
pub use grid::{Grid, Placement, effective_span, footprint};
pub use sampler::{LENGTH_WEIGHTS, SegmentSampler};
pub use search::{CircuitPathSearch, SearchConfig, SearchOutcome, SearchPhase, SearchStats};
