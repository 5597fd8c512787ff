//! Colour-targeted object placement on a planet surface.
//!
//! Candidates are drawn as uniform random directions. A candidate whose
//! surface colour matches one of a rule's target colours seeds a group:
//! members are scattered in the tangent plane around it, re-projected onto
//! the surface, and kept only if they respect the minimum spacing against
//! every placement made so far. One attempt budget is shared by all rules,
//! consumed in list order.

use glam::{DQuat, DVec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::seed::{random_in_unit_circle, random_unit_vector};
use crate::{Rgba, SurfaceQuery, TerrainError};

/// What to place and where.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRule {
    /// Label used in reports and logs.
    pub name: String,
    /// Prefab identifier used when `variants` is empty.
    pub prefab: String,
    /// Alternative prefabs; one is chosen uniformly per placement.
    pub variants: Vec<String>,
    /// Number of objects wanted.
    pub target_count: u32,
    /// Surface colours this rule may be placed on.
    pub match_colours: Vec<Rgba>,
    /// Largest group seeded by a single matching candidate.
    pub max_group_size: u32,
    /// Scatter radius of a group in the tangent plane.
    pub group_radius: f64,
}

impl Default for SpawnRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            prefab: String::new(),
            variants: Vec::new(),
            target_count: 0,
            match_colours: Vec::new(),
            max_group_size: 1,
            group_radius: 1.0,
        }
    }
}

impl SpawnRule {
    pub fn validate(&self, index: usize) -> Result<(), TerrainError> {
        let fail = |reason| {
            Err(TerrainError::InvalidSpawnRule {
                index,
                name: self.name.clone(),
                reason,
            })
        };
        if self.prefab.is_empty() && self.variants.is_empty() {
            return fail("no prefab or variants");
        }
        if self.match_colours.is_empty() {
            return fail("no target colours");
        }
        if self.max_group_size == 0 {
            return fail("max group size must be at least 1");
        }
        if !(self.group_radius.is_finite() && self.group_radius >= 0.0) {
            return fail("group radius must be finite and non-negative");
        }
        Ok(())
    }

    /// Prefab for one placement.
    pub fn choose_prefab<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        if self.variants.is_empty() {
            &self.prefab
        } else {
            &self.variants[rng.random_range(0..self.variants.len())]
        }
    }
}

/// Spawner-wide limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerSettings {
    /// Candidate directions drawn across all rules.
    pub max_attempts: u32,
    /// Per-channel colour tolerance (exclusive).
    pub colour_threshold: f32,
    /// Minimum straight-line distance between any two placements.
    pub min_distance: f64,
    /// Offsets tried per group member before giving up on that member.
    pub group_attempts: u32,
}

impl Default for SpawnerSettings {
    fn default() -> Self {
        Self {
            max_attempts: 1000,
            colour_threshold: 0.1,
            min_distance: 1.0,
            group_attempts: 10,
        }
    }
}

impl SpawnerSettings {
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !(self.colour_threshold.is_finite() && self.colour_threshold >= 0.0) {
            return Err(TerrainError::InvalidSpawnerSettings(
                "colour threshold must be finite and non-negative",
            ));
        }
        if !(self.min_distance.is_finite() && self.min_distance >= 0.0) {
            return Err(TerrainError::InvalidSpawnerSettings(
                "minimum distance must be finite and non-negative",
            ));
        }
        if self.group_attempts == 0 {
            return Err(TerrainError::InvalidSpawnerSettings(
                "group attempts must be at least 1",
            ));
        }
        Ok(())
    }
}

/// One placed object.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// Index of the rule that produced it.
    pub rule: usize,
    /// Chosen prefab or variant.
    pub prefab: String,
    /// Surface position.
    pub position: DVec3,
    /// Outward unit normal at `position`.
    pub normal: DVec3,
    /// Rotation taking the object's +Y onto `normal`.
    pub rotation: DQuat,
}

/// How far a single rule got.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleOutcome {
    pub name: String,
    pub target: u32,
    pub placed: u32,
    /// Matching candidates that seeded a group.
    pub groups: u32,
}

impl RuleOutcome {
    pub fn is_satisfied(&self) -> bool {
        self.placed >= self.target
    }
}

/// Result of a placement pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnReport {
    pub placements: Vec<Placement>,
    /// One entry per rule, in rule order.
    pub outcomes: Vec<RuleOutcome>,
    /// Candidate directions drawn from the shared budget.
    pub attempts_used: u32,
}

impl SpawnReport {
    pub fn total(&self) -> usize {
        self.placements.len()
    }

    pub fn fully_satisfied(&self) -> bool {
        self.outcomes.iter().all(RuleOutcome::is_satisfied)
    }
}

/// Places objects according to a list of [`SpawnRule`]s.
#[derive(Clone, Debug, Default)]
pub struct BiomeSpawner {
    settings: SpawnerSettings,
}

impl BiomeSpawner {
    pub fn new(settings: SpawnerSettings) -> Result<Self, TerrainError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &SpawnerSettings {
        &self.settings
    }

    /// Run one placement pass over `rules` in order.
    ///
    /// Unsatisfied rules are reported in the outcome list, not as errors.
    pub fn place_objects<S, R>(
        &self,
        surface: &S,
        rules: &[SpawnRule],
        rng: &mut R,
    ) -> Result<SpawnReport, TerrainError>
    where
        S: SurfaceQuery + ?Sized,
        R: Rng + ?Sized,
    {
        for (index, rule) in rules.iter().enumerate() {
            rule.validate(index)?;
        }

        let settings = &self.settings;
        let min_distance_sq = settings.min_distance * settings.min_distance;
        let mut report = SpawnReport::default();
        let mut placed_positions: Vec<DVec3> = Vec::new();

        for (index, rule) in rules.iter().enumerate() {
            let mut outcome = RuleOutcome {
                name: rule.name.clone(),
                target: rule.target_count,
                placed: 0,
                groups: 0,
            };

            while outcome.placed < rule.target_count && report.attempts_used < settings.max_attempts
            {
                report.attempts_used += 1;
                let anchor = surface.point_on_surface(random_unit_vector(rng));
                if !surface.matches_any(anchor, &rule.match_colours, settings.colour_threshold) {
                    continue;
                }
                outcome.groups += 1;

                let group_size = rule.max_group_size.min(rule.target_count - outcome.placed);
                let (tangent, bitangent) = tangent_frame(anchor);
                let mut group: Vec<DVec3> = Vec::new();

                for _ in 0..group_size {
                    for _ in 0..settings.group_attempts {
                        let offset2 = random_in_unit_circle(rng) * rule.group_radius;
                        let direction =
                            (anchor + tangent * offset2.x + bitangent * offset2.y).normalize_or_zero();
                        if direction == DVec3::ZERO {
                            continue;
                        }
                        let candidate = surface.point_on_surface(direction);
                        let too_close = placed_positions
                            .iter()
                            .chain(group.iter())
                            .any(|p| p.distance_squared(candidate) < min_distance_sq);
                        if !too_close {
                            group.push(candidate);
                            break;
                        }
                    }
                }

                for position in group {
                    let normal = position.normalize_or_zero();
                    report.placements.push(Placement {
                        rule: index,
                        prefab: rule.choose_prefab(rng).to_owned(),
                        position,
                        normal,
                        rotation: DQuat::from_rotation_arc(DVec3::Y, normal),
                    });
                    placed_positions.push(position);
                    outcome.placed += 1;
                }
            }

            if outcome.is_satisfied() {
                tracing::debug!(
                    "Spawn rule '{}': placed {}/{} in {} groups",
                    outcome.name,
                    outcome.placed,
                    outcome.target,
                    outcome.groups
                );
            } else {
                tracing::warn!(
                    "Spawn rule '{}' partially fulfilled: {}/{} placed, {} of {} attempts used",
                    outcome.name,
                    outcome.placed,
                    outcome.target,
                    report.attempts_used,
                    settings.max_attempts
                );
            }
            report.outcomes.push(outcome);
        }

        tracing::info!(
            "Spawner placed {} objects across {} rules using {}/{} attempts",
            report.total(),
            rules.len(),
            report.attempts_used,
            settings.max_attempts
        );
        Ok(report)
    }
}

/// Orthonormal tangent and bitangent at a surface point.
///
/// The tangent is `normal × Y`, falling back to `normal × X` at the poles.
fn tangent_frame(point: DVec3) -> (DVec3, DVec3) {
    let normal = point.normalize_or_zero();
    let mut tangent = normal.cross(DVec3::Y);
    if tangent.length_squared() < 1e-12 {
        tangent = normal.cross(DVec3::X);
    }
    let tangent = tangent.normalize_or_zero();
    let bitangent = normal.cross(tangent).normalize_or_zero();
    (tangent, bitangent)
}
