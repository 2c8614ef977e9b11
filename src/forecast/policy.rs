// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Deployment policies -- world state in, capacity allocation out.

use serde::{Deserialize, Serialize};

use super::world::{DeploymentAction, WorldState};

/// Policies are shared across trial threads and must not carry mutable state.
pub trait Policy: Sync {
    fn decide(&self, state: &WorldState) -> DeploymentAction;
}

impl<F> Policy for F
where
    F: Fn(&WorldState) -> DeploymentAction + Sync,
{
    fn decide(&self, state: &WorldState) -> DeploymentAction {
        self(state)
    }
}

/// Grow each segment by a fixed share of its installed capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Proportional {
    pub orbit_growth: f64,
    pub ground_growth: f64,
}

impl Default for Proportional {
    fn default() -> Self {
        Self { orbit_growth: 0.45, ground_growth: 0.12 }
    }
}

impl Policy for Proportional {
    fn decide(&self, state: &WorldState) -> DeploymentAction {
        DeploymentAction {
            orbit_capacity_added: state.orbit_capacity * self.orbit_growth.max(0.0),
            ground_capacity_added: state.ground_capacity * self.ground_growth.max(0.0),
        }
    }
}

/// Tilt growth toward whichever segment is currently cheaper. The tilt is the
/// unit-cost ratio, bounded by `max_tilt` in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostSeeking {
    pub orbit_growth: f64,
    pub ground_growth: f64,
    pub max_tilt: f64,
}

impl Default for CostSeeking {
    fn default() -> Self {
        Self { orbit_growth: 0.30, ground_growth: 0.12, max_tilt: 2.0 }
    }
}

impl Policy for CostSeeking {
    fn decide(&self, state: &WorldState) -> DeploymentAction {
        let max_tilt = self.max_tilt.max(1.0);
        let ratio = if state.orbit_unit_cost > 0.0 {
            state.ground_unit_cost / state.orbit_unit_cost
        } else {
            max_tilt
        };
        let tilt = ratio.clamp(1.0 / max_tilt, max_tilt);
        DeploymentAction {
            orbit_capacity_added: state.orbit_capacity * (self.orbit_growth * tilt).max(0.0),
            ground_capacity_added: state.ground_capacity * (self.ground_growth / tilt).max(0.0),
        }
    }
}

/// Built-in policies, selectable from JSON or a JS object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyKind {
    Proportional(Proportional),
    CostSeeking(CostSeeking),
}

impl Default for PolicyKind {
    fn default() -> Self {
        Self::Proportional(Proportional::default())
    }
}

impl Policy for PolicyKind {
    fn decide(&self, state: &WorldState) -> DeploymentAction {
        match self {
            Self::Proportional(p) => p.decide(state),
            Self::CostSeeking(p) => p.decide(state),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
