// engine/src/engine/constants.rs
#![forbid(unsafe_code)]

/// Hole columns on the board (0..=62).
pub const W: usize = 63;
/// Logical hole rows (0..=9). The physical board has two extra holeless rows in the middle.
pub const H: usize = 10;

pub const MAX_COL: i32 = (W as i32) - 1;
pub const MAX_ROW: i32 = (H as i32) - 1;

/// Rows 0..HALF_H are the bottom half, HALF_H..H the top half.
pub const HALF_H: usize = 5;
pub const BOTTOM_HALF_TOP_ROW: i32 = (HALF_H as i32) - 1;

/// Holeless rows separating the halves. Logical row `r > 4` is physical row `r + GAP_ROWS`.
pub const GAP_ROWS: i32 = 2;

pub const BOTTOM_RAIL_ROW: i32 = 0;
pub const TOP_RAIL_ROW: i32 = MAX_ROW;

/// Highest row a middle segment may start or end on in the top half.
/// Row 9 is reserved for the top rail anchor.
pub const TOP_HALF_LAST_FREE_ROW: i32 = TOP_RAIL_ROW - 1;

/// A North segment starting in the bottom half whose `y + length` reaches this row
/// has to bridge the gap.
pub const GAP_BRIDGE_ROW: i32 = 7;

/// Holes on one power rail that can feed the board.
pub const RAIL_HOLES: u32 = 50;
/// Power bus holes come in groups of this many, followed by one skipped column.
pub const RAIL_GROUP: u32 = 5;
/// Column of rail hole 0.
pub const RAIL_FIRST_COL: i32 = 2;
/// Every `RAIL_PERIOD`-th column (offset by one) has no rail hole above/below it.
pub const RAIL_PERIOD: i32 = 6;

pub const MIN_ANCHOR_LEN: u8 = 1;
pub const MAX_ANCHOR_LEN: u8 = 4;

pub const MIN_MIDDLE_LEN: u8 = 2;
pub const MAX_MIDDLE_LEN: u8 = 10;
