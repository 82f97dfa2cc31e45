//! Per-condition edge weights.
//!
//! Every edge carries one travel time, in minutes, for each
//! [`TrafficCondition`].  A weight must be finite and strictly positive; the
//! shortest-path search relies on that to skip negative-cycle handling.
//!
//! # Fixed-point costs
//!
//! Routing never sums minutes as `f64`: the order of floating-point additions
//! would leak into path costs (`0.1 + 0.2 + 0.3 != 0.3 + 0.2 + 0.1`).  Each
//! weight is converted once to whole milliseconds ([`EdgeWeights::millis`]),
//! path costs are `u64` sums of those, and minutes only reappear when a
//! result is handed back ([`millis_to_minutes`]).

use rd_core::TrafficCondition;

use crate::{GraphError, GraphResult};

/// Milliseconds in one minute of travel time.
pub const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Convert a fixed-point cost back to minutes.
#[inline]
pub fn millis_to_minutes(millis: u64) -> f64 {
    millis as f64 / MILLIS_PER_MINUTE
}

/// Travel time in minutes under each traffic condition.
///
/// Fields are public for cheap reads; [`CityGraph::add_edge`] re-validates
/// whatever it is given, so a hand-built value with a bad weight is still
/// rejected before it reaches the graph.
///
/// [`CityGraph::add_edge`]: crate::CityGraph::add_edge
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeWeights {
    pub light:     f64,
    pub normal:    f64,
    pub rush_hour: f64,
}

impl EdgeWeights {
    /// Build and validate a weight set.
    pub fn new(light: f64, normal: f64, rush_hour: f64) -> GraphResult<Self> {
        let w = Self { light, normal, rush_hour };
        w.validate()?;
        Ok(w)
    }

    /// Build from `(condition, minutes)` pairs.
    ///
    /// Later pairs for the same condition overwrite earlier ones.  Fails with
    /// [`GraphError::InvalidWeight`] (`value: None`) for the first condition,
    /// in [`TrafficCondition::ALL`] order, that has no pair.
    pub fn from_pairs<I>(pairs: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (TrafficCondition, f64)>,
    {
        let mut slots: [Option<f64>; 3] = [None; 3];
        for (condition, minutes) in pairs {
            slots[slot(condition)] = Some(minutes);
        }
        for condition in TrafficCondition::ALL {
            if slots[slot(condition)].is_none() {
                return Err(GraphError::InvalidWeight { condition, value: None });
            }
        }
        let [light, normal, rush_hour] = slots.map(|s| s.unwrap_or_default());
        Self::new(light, normal, rush_hour)
    }

    /// Check every weight is finite and strictly positive.
    pub fn validate(&self) -> GraphResult<()> {
        for condition in TrafficCondition::ALL {
            let value = self.cost(condition);
            if !(value.is_finite() && value > 0.0) {
                return Err(GraphError::InvalidWeight { condition, value: Some(value) });
            }
        }
        Ok(())
    }

    /// Travel time in minutes under `condition`.
    #[inline]
    pub fn cost(&self, condition: TrafficCondition) -> f64 {
        match condition {
            TrafficCondition::Light    => self.light,
            TrafficCondition::Normal   => self.normal,
            TrafficCondition::RushHour => self.rush_hour,
        }
    }

    /// Travel time under `condition` in whole milliseconds, rounded to
    /// nearest.  Never 0 for a validated weight.
    #[inline]
    pub fn millis(&self, condition: TrafficCondition) -> u64 {
        ((self.cost(condition) * MILLIS_PER_MINUTE).round() as u64).max(1)
    }
}

#[inline]
fn slot(condition: TrafficCondition) -> usize {
    match condition {
        TrafficCondition::Light    => 0,
        TrafficCondition::Normal   => 1,
        TrafficCondition::RushHour => 2,
    }
}
