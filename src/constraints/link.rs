// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Spectrum and ground backhaul -- getting results back to the ground.
//!
//! Spectrum limits what each satellite can export over its own downlink.
//! Backhaul limits what the ground segment can absorb from the whole fleet.
//! Both derate compute; neither removes satellites.

use serde::{Deserialize, Serialize};

use crate::fleet::DesignSet;

/// Downlink needed per PFLOP of onboard compute, Gbps.
pub const GBPS_PER_PFLOP: f64 = 4.0;
/// Ground-station backhaul capacity in the first year, Gbps.
pub const BASE_BACKHAUL_GBPS: f64 = 8_000.0;
pub const BACKHAUL_GROWTH: f64 = 0.35;

const MIN_DEMAND_GBPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumReport {
    /// `min(1, downlink / required)`, compute-weighted across classes.
    pub derating: f64,
    /// `min(1, required / downlink)`, compute-weighted across classes.
    pub utilization: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackhaulReport {
    pub capacity_gbps: f64,
    pub demand_gbps: f64,
    pub derating: f64,
    pub utilization: f64,
}

pub fn backhaul_capacity_gbps(years_elapsed: u32) -> f64 {
    BASE_BACKHAUL_GBPS * (1.0 + BACKHAUL_GROWTH).powi(years_elapsed as i32)
}

pub fn spectrum(designs: &DesignSet, alive_by_class: [u32; 2]) -> SpectrumReport {
    let counts = if alive_by_class.iter().all(|&n| n == 0) {
        [1.0 - designs.class_b_fraction, designs.class_b_fraction]
    } else {
        [alive_by_class[0] as f64, alive_by_class[1] as f64]
    };

    let mut weight_sum = 0.0;
    let mut derating = 0.0;
    let mut utilization = 0.0;
    for (design, count) in designs.designs.iter().zip(counts) {
        let required = design.pflops.max(0.0) * GBPS_PER_PFLOP;
        let w = count * design.pflops.max(0.0);
        if w <= 0.0 {
            continue;
        }
        let (d, u) = if required < MIN_DEMAND_GBPS {
            (1.0, 0.0)
        } else if design.downlink_gbps <= 0.0 {
            (0.0, 1.0)
        } else {
            (
                (design.downlink_gbps / required).min(1.0),
                (required / design.downlink_gbps).min(1.0),
            )
        };
        weight_sum += w;
        derating += w * d;
        utilization += w * u;
    }

    if weight_sum <= 0.0 {
        return SpectrumReport { derating: 1.0, utilization: 0.0 };
    }
    SpectrumReport {
        derating: (derating / weight_sum).clamp(0.0, 1.0),
        utilization: (utilization / weight_sum).clamp(0.0, 1.0),
    }
}

/// Fleet export demand after thermal and spectrum throttling, against the
/// ground segment's capacity for the year.
pub fn backhaul(
    raw_compute_pflops: f64,
    thermal_derating: f64,
    spectrum_derating: f64,
    years_elapsed: u32,
) -> BackhaulReport {
    let capacity_gbps = backhaul_capacity_gbps(years_elapsed);
    let demand_gbps = raw_compute_pflops.max(0.0)
        * thermal_derating.clamp(0.0, 1.0)
        * spectrum_derating.clamp(0.0, 1.0)
        * GBPS_PER_PFLOP;

    if demand_gbps < MIN_DEMAND_GBPS {
        return BackhaulReport { capacity_gbps, demand_gbps, derating: 1.0, utilization: 0.0 };
    }
    BackhaulReport {
        capacity_gbps,
        demand_gbps,
        derating: (capacity_gbps / demand_gbps).min(1.0),
        utilization: (demand_gbps / capacity_gbps.max(MIN_DEMAND_GBPS)).min(1.0),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
