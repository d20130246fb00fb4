// engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod engine;

// Re-export the bits the driver needs:
pub use engine::{
    AssetCatalog, AssetId, Circuit, CircuitError, CircuitPathSearch, Direction, Grid, Hole,
    PlacementRecord, SearchConfig, SearchOutcome, SearchStats, Segment, SegmentRole, emit, H, W,
};
