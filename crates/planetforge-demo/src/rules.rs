//! Spawn rules for the demo: loaded from RON, or derived from the planet's
//! own gradient when no rule file is configured.

use std::path::Path;

use planetforge_terrain::{ColourSettings, SpawnRule};

use crate::DemoError;

/// Read a RON list of spawn rules.
pub fn load_rules(path: &Path) -> Result<Vec<SpawnRule>, DemoError> {
    let contents = std::fs::read_to_string(path).map_err(DemoError::RulesRead)?;
    ron::from_str(&contents).map_err(DemoError::RulesParse)
}

/// One rule per interior gradient band: vegetation on the lower band,
/// rocks on the upper one.
pub fn default_rules(colours: &ColourSettings) -> Vec<SpawnRule> {
    let keys = colours.gradient.keys();
    let band = |i: usize| keys.get(i).or(keys.last()).map(|k| k.colour);

    let mut rules = Vec::new();
    if let Some(lowland) = band(1) {
        rules.push(SpawnRule {
            name: "vegetation".to_string(),
            prefab: "tree".to_string(),
            variants: vec!["tree_pine".to_string(), "tree_oak".to_string(), "bush".to_string()],
            target_count: 60,
            match_colours: vec![lowland],
            max_group_size: 4,
            group_radius: 1.5,
        });
    }
    if let Some(highland) = band(2) {
        rules.push(SpawnRule {
            name: "rocks".to_string(),
            prefab: "rock".to_string(),
            variants: Vec::new(),
            target_count: 25,
            match_colours: vec![highland],
            max_group_size: 2,
            group_radius: 1.0,
        });
    }
    rules
}
