//! Traffic condition enum shared by the graph and dispatch crates.
//!
//! The set of conditions is part of the edge schema: every edge carries one
//! weight per variant.  Adding a variant is a schema change that every edge
//! source must follow.

use std::str::FromStr;

use crate::CoreError;

/// Which weight of an edge a routing query uses.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrafficCondition {
    /// Off-peak, near free-flow.
    Light,
    #[default]
    Normal,
    /// Peak commuting hours.
    RushHour,
}

impl TrafficCondition {
    /// All conditions in schema order.
    pub const ALL: [TrafficCondition; 3] = [
        TrafficCondition::Light,
        TrafficCondition::Normal,
        TrafficCondition::RushHour,
    ];

    /// Label used in CSV headers and user-facing text.
    pub fn as_str(self) -> &'static str {
        match self {
            TrafficCondition::Light    => "light",
            TrafficCondition::Normal   => "normal",
            TrafficCondition::RushHour => "rush_hour",
        }
    }
}

impl std::fmt::Display for TrafficCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrafficCondition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light"     => Ok(TrafficCondition::Light),
            "normal"    => Ok(TrafficCondition::Normal),
            "rush_hour" => Ok(TrafficCondition::RushHour),
            other => Err(CoreError::UnknownTrafficCondition(other.to_owned())),
        }
    }
}
