//! Named scenario presets.
//!
//! Six plausible null scenarios (`s1`..`s6`) vary the X -> M and direct
//! paths with a unit mediator error. Two unrealistic scenarios (`u1`, `u2`)
//! push `|a|` to 0.9 with a mediator error SD of 0.1, which makes X and M
//! nearly collinear. The indirect path `b` is zero in every preset.

use r2med_types::{ScenarioKind, ScenarioPreset, SimulationConfig};

/// All built-in presets in display order.
pub static PRESETS: [ScenarioPreset; 8] = [
    plausible("s1", "Scenario 1 (Plausible)", "a = 0.5, c' = 0.5, b = 0", 0.5, 0.5),
    plausible("s2", "Scenario 2 (Plausible)", "a = 0.1, c' = 0.5, b = 0", 0.1, 0.5),
    plausible("s3", "Scenario 3 (Plausible)", "a = 0.5, c' = 0.1, b = 0", 0.5, 0.1),
    plausible("s4", "Scenario 4 (Plausible)", "a = -0.5, c' = 0.5, b = 0", -0.5, 0.5),
    plausible("s5", "Scenario 5 (Plausible)", "a = -0.1, c' = 0.5, b = 0", -0.1, 0.5),
    plausible("s6", "Scenario 6 (Plausible)", "a = -0.5, c' = 0.1, b = 0", -0.5, 0.1),
    unrealistic(
        "u1",
        "Scenario U1 (Unrealistic)",
        "a = 0.9, c' = 0.5, b = 0, Low SD(M)",
        0.9,
    ),
    unrealistic(
        "u2",
        "Scenario U2 (Unrealistic)",
        "a = -0.9, c' = 0.5, b = 0, Low SD(M)",
        -0.9,
    ),
];

const fn plausible(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    a: f64,
    c_prime: f64,
) -> ScenarioPreset {
    ScenarioPreset {
        id,
        name,
        description,
        kind: ScenarioKind::Plausible,
        a,
        c_prime,
        b: 0.0,
        sigma_em: 1.0,
    }
}

const fn unrealistic(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    a: f64,
) -> ScenarioPreset {
    ScenarioPreset {
        id,
        name,
        description,
        kind: ScenarioKind::Unrealistic,
        a,
        c_prime: 0.5,
        b: 0.0,
        sigma_em: 0.1,
    }
}

/// Look up a preset by id (case-insensitive).
pub fn find_preset(id: &str) -> Option<&'static ScenarioPreset> {
    PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// The preset whose coefficients `config` carries, if any.
pub fn matching_preset(config: &SimulationConfig) -> Option<&'static ScenarioPreset> {
    PRESETS.iter().find(|p| p.matches(config))
}
