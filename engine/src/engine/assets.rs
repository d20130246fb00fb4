// engine/src/engine/assets.rs
#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::circuit::SegmentRole;
use crate::engine::constants::{MAX_ANCHOR_LEN, MAX_MIDDLE_LEN, MIN_ANCHOR_LEN, MIN_MIDDLE_LEN};
use crate::engine::emitter::PlacementRecord;
use crate::engine::error::CircuitError;

/// Wires plugged into a power rail.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RailWire {
    Edge7mm,
    Edge10mm,
    Edge12mm,
    Edge15mm,
    Edge17mm,
}

impl RailWire {
    pub fn all() -> &'static [RailWire] {
        use RailWire::*;
        &[Edge7mm, Edge10mm, Edge12mm, Edge15mm, Edge17mm]
    }

    pub fn name(self) -> &'static str {
        use RailWire::*;
        match self {
            Edge7mm => "Edge7mm",
            Edge10mm => "Edge10mm",
            Edge12mm => "Edge12mm",
            Edge15mm => "Edge15mm",
            Edge17mm => "Edge17mm",
        }
    }

    /// Board holes covered when plugged into the outside rail.
    /// The 7mm wire does not reach the board from the outside rail.
    pub fn outside_rail_span(self) -> Option<u8> {
        use RailWire::*;
        match self {
            Edge7mm => None,
            Edge10mm => Some(1),
            Edge12mm => Some(2),
            Edge15mm => Some(3),
            Edge17mm => Some(4),
        }
    }
}

impl FromStr for RailWire {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RailWire::all()
            .iter()
            .copied()
            .find(|w| w.name() == s)
            .ok_or_else(|| CircuitError::UnknownAsset(s.to_string()))
    }
}

/// Jumpers and resistors that start and end on the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MiddleWire {
    Jumper2mm,
    Jumper5mm,
    Jumper7mm,
    Resistor,
    Jumper12mm,
    Jumper15mm,
    Jumper17mm,
    Jumper20mm,
    Jumper22mm,
}

impl MiddleWire {
    pub fn all() -> &'static [MiddleWire] {
        use MiddleWire::*;
        &[
            Jumper2mm, Jumper5mm, Jumper7mm, Resistor, Jumper12mm, Jumper15mm, Jumper17mm,
            Jumper20mm, Jumper22mm,
        ]
    }

    /// Identity used by the asset library.
    pub fn name(self) -> &'static str {
        use MiddleWire::*;
        match self {
            Jumper2mm => "2mm63",
            Jumper5mm => "5mm63",
            Jumper7mm => "7mm63",
            Resistor => "resistor63v4",
            Jumper12mm => "12mm63",
            Jumper15mm => "15mm63",
            Jumper17mm => "17mm63",
            Jumper20mm => "20mm63",
            Jumper22mm => "22mm63",
        }
    }

    pub fn span(self) -> u8 {
        use MiddleWire::*;
        match self {
            Jumper2mm => 2,
            Jumper5mm => 3,
            Jumper7mm => 4,
            Resistor => 5,
            Jumper12mm => 6,
            Jumper15mm => 7,
            Jumper17mm => 8,
            Jumper20mm => 9,
            Jumper22mm => 10,
        }
    }
}

impl FromStr for MiddleWire {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MiddleWire::all()
            .iter()
            .copied()
            .find(|w| w.name() == s)
            .ok_or_else(|| CircuitError::UnknownAsset(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    Rail(RailWire),
    Middle(MiddleWire),
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::Rail(w) => f.write_str(w.name()),
            AssetId::Middle(w) => f.write_str(w.name()),
        }
    }
}

/// Length -> asset lookup for both wire families.
///
/// Built once from the asset library and checked for completeness up front, so a sampled length
/// can never miss at placement time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetCatalog {
    rail_by_len: [Option<RailWire>; MAX_ANCHOR_LEN as usize + 1],
    middle_by_len: [Option<MiddleWire>; MAX_MIDDLE_LEN as usize + 1],
}

impl AssetCatalog {
    /// Every known asset.
    pub fn standard() -> Self {
        let mut c = Self::empty();
        for &w in RailWire::all() {
            c.insert_rail(w);
        }
        for &w in MiddleWire::all() {
            c.insert_middle(w);
        }
        c
    }

    fn empty() -> Self {
        Self {
            rail_by_len: [None; MAX_ANCHOR_LEN as usize + 1],
            middle_by_len: [None; MAX_MIDDLE_LEN as usize + 1],
        }
    }

    /// First asset registered for a length wins.
    fn insert_rail(&mut self, w: RailWire) {
        if let Some(len) = w.outside_rail_span() {
            let slot = &mut self.rail_by_len[len as usize];
            if slot.is_none() {
                *slot = Some(w);
            }
        }
    }

    fn insert_middle(&mut self, w: MiddleWire) {
        let slot = &mut self.middle_by_len[w.span() as usize];
        if slot.is_none() {
            *slot = Some(w);
        }
    }

    pub fn from_assets(rail: &[RailWire], middle: &[MiddleWire]) -> Result<Self, CircuitError> {
        let mut c = Self::empty();
        for &w in rail {
            c.insert_rail(w);
        }
        for &w in middle {
            c.insert_middle(w);
        }
        c.check_complete()?;
        Ok(c)
    }

    /// Build from the string identities of an asset library.
    pub fn from_names<'a, R, M>(rail: R, middle: M) -> Result<Self, CircuitError>
    where
        R: IntoIterator<Item = &'a str>,
        M: IntoIterator<Item = &'a str>,
    {
        let rail = rail
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<RailWire>, _>>()?;
        let middle = middle
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<MiddleWire>, _>>()?;
        Self::from_assets(&rail, &middle)
    }

    fn check_complete(&self) -> Result<(), CircuitError> {
        for len in MIN_ANCHOR_LEN..=MAX_ANCHOR_LEN {
            self.rail_wire(len, SegmentRole::BottomAnchor)?;
        }
        for len in MIN_MIDDLE_LEN..=MAX_MIDDLE_LEN {
            self.middle_wire(len)?;
        }
        Ok(())
    }

    fn rail_wire(&self, length: u8, role: SegmentRole) -> Result<RailWire, CircuitError> {
        self.rail_by_len
            .get(length as usize)
            .copied()
            .flatten()
            .ok_or(CircuitError::MissingLength { role, length })
    }

    pub fn middle_wire(&self, length: u8) -> Result<MiddleWire, CircuitError> {
        self.middle_by_len
            .get(length as usize)
            .copied()
            .flatten()
            .ok_or(CircuitError::MissingLength {
                role: SegmentRole::Middle,
                length,
            })
    }

    pub fn bottom_rail_wire(&self, length: u8) -> Result<RailWire, CircuitError> {
        self.rail_wire(length, SegmentRole::BottomAnchor)
    }

    pub fn top_rail_wire(&self, length: u8) -> Result<RailWire, CircuitError> {
        self.rail_wire(length, SegmentRole::TopAnchor)
    }

    /// The role picks the table, the length picks the asset.
    pub fn resolve(&self, record: &PlacementRecord) -> Result<AssetId, CircuitError> {
        match record.role {
            SegmentRole::BottomAnchor => self.bottom_rail_wire(record.length).map(AssetId::Rail),
            SegmentRole::TopAnchor => self.top_rail_wire(record.length).map(AssetId::Rail),
            SegmentRole::Middle => self.middle_wire(record.length).map(AssetId::Middle),
        }
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
