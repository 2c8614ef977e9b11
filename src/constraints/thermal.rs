// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Heat rejection -- radiative cooling against electrical waste heat.
//!
//! ```text
//! Q_gen = P × 0.85
//! Q_max = σ × ε × A × T⁴
//! ```
//!
//! Utilization and derating are both hard-clamped to 1.0. A satellite that
//! cannot reject its waste heat runs throttled rather than reporting more than
//! 100 % utilization.

use serde::{Deserialize, Serialize};

use crate::fleet::{ClassDesign, DesignSet};

/// Stefan–Boltzmann constant, W·m⁻²·K⁻⁴.
pub const STEFAN_BOLTZMANN: f64 = 5.670374419e-8;
pub const RADIATOR_EMISSIVITY: f64 = 0.90;
/// Radiator surface temperature, K.
pub const RADIATOR_TEMP_K: f64 = 330.0;
/// Share of electrical power that ends up as heat to reject.
pub const LOSS_FRACTION: f64 = 0.85;

const BODY_MOUNTED_MAX_M2: f64 = 20.0;
const DEPLOYABLE_MAX_M2: f64 = 100.0;
const BLEEDING_EDGE_MAX_M2: f64 = 500.0;

/// Smallest heat load treated as non-zero, kW.
const MIN_HEAT_KW: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Radiator envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RadiatorEnvelope {
    BodyMounted,
    Deployable,
    BleedingEdge,
    Infeasible,
}

impl RadiatorEnvelope {
    pub fn classify(area_m2: f64) -> Self {
        if area_m2 <= BODY_MOUNTED_MAX_M2 {
            Self::BodyMounted
        } else if area_m2 <= DEPLOYABLE_MAX_M2 {
            Self::Deployable
        } else if area_m2 <= BLEEDING_EDGE_MAX_M2 {
            Self::BleedingEdge
        } else {
            Self::Infeasible
        }
    }
}

/// Radiator area that can actually be flown.
pub fn usable_radiator_area(requested_m2: f64) -> f64 {
    requested_m2.clamp(0.0, BLEEDING_EDGE_MAX_M2)
}

/// Maximum heat rejection of a radiator, kW.
pub fn max_heat_rejection_kw(area_m2: f64) -> f64 {
    STEFAN_BOLTZMANN * RADIATOR_EMISSIVITY * area_m2 * RADIATOR_TEMP_K.powi(4) / 1_000.0
}

// ---------------------------------------------------------------------------
// Per-class and fleet figures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalReport {
    pub envelope: RadiatorEnvelope,
    pub heat_generated_kw: f64,
    pub heat_rejection_kw: f64,
    /// `min(1, Q_gen / Q_max)`
    pub utilization: f64,
    /// `min(1, Q_max / Q_gen)`
    pub derating: f64,
}

pub fn class_thermal(design: &ClassDesign) -> ThermalReport {
    let envelope = RadiatorEnvelope::classify(design.radiator_m2);
    let heat_generated_kw = design.power_kw.max(0.0) * LOSS_FRACTION;
    let heat_rejection_kw = max_heat_rejection_kw(usable_radiator_area(design.radiator_m2));

    let (utilization, derating) = if heat_generated_kw < MIN_HEAT_KW {
        (0.0, 1.0)
    } else if heat_rejection_kw <= 0.0 {
        (1.0, 0.0)
    } else {
        (
            (heat_generated_kw / heat_rejection_kw).min(1.0),
            (heat_rejection_kw / heat_generated_kw).min(1.0),
        )
    };

    ThermalReport { envelope, heat_generated_kw, heat_rejection_kw, utilization, derating }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FleetThermal {
    pub utilization: f64,
    pub derating: f64,
    pub per_class: [ThermalReport; 2],
}

/// Installed-power-weighted thermal figures for the operating fleet. An empty
/// fleet is weighted by the deployment mix instead.
pub fn fleet_thermal(designs: &DesignSet, alive_by_class: [u32; 2]) -> FleetThermal {
    let per_class = [class_thermal(&designs.designs[0]), class_thermal(&designs.designs[1])];

    let counts = if alive_by_class.iter().all(|&n| n == 0) {
        [1.0 - designs.class_b_fraction, designs.class_b_fraction]
    } else {
        [alive_by_class[0] as f64, alive_by_class[1] as f64]
    };
    let weights = [
        counts[0] * designs.designs[0].power_kw,
        counts[1] * designs.designs[1].power_kw,
    ];
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return FleetThermal { utilization: 0.0, derating: 1.0, per_class };
    }

    let weighted = |f: fn(&ThermalReport) -> f64| {
        (weights[0] * f(&per_class[0]) + weights[1] * f(&per_class[1])) / total
    };
    FleetThermal {
        utilization: weighted(|r| r.utilization).clamp(0.0, 1.0),
        derating: weighted(|r| r.derating).clamp(0.0, 1.0),
        per_class,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
