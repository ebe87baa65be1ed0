use crate::agent::Agent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cumulative deaths by cause. Every counter only ever increases.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DeathCounters {
    pub patch_natural: u64,
    pub patch_frayed: u64,
    pub patch_eaten: u64,
    pub grazer_population_control: u64,
    pub grazer_starvation: u64,
    pub fawn_mortality: u64,
    pub adult_mortality: u64,
}

impl DeathCounters {
    pub fn patch_total(&self) -> u64 {
        self.patch_natural + self.patch_frayed + self.patch_eaten
    }

    pub fn grazer_total(&self) -> u64 {
        self.grazer_population_control
            + self.grazer_starvation
            + self.fawn_mortality
            + self.adult_mortality
    }

    pub fn total(&self) -> u64 {
        self.patch_total() + self.grazer_total()
    }
}

/// Live population broken down the way the reports need it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PopulationCounts {
    pub grazers: usize,
    pub adult_grazers: usize,
    pub fawns: usize,
    pub fully_grown_patches: usize,
    pub juvenile_patches: usize,
}

impl PopulationCounts {
    pub fn total_patches(&self) -> usize {
        self.fully_grown_patches + self.juvenile_patches
    }
}

pub fn population_counts<'a>(agents: impl IntoIterator<Item = &'a Agent>) -> PopulationCounts {
    let mut counts = PopulationCounts::default();
    for agent in agents {
        match agent {
            Agent::Grazer(grazer) => {
                counts.grazers += 1;
                if grazer.is_adult() {
                    counts.adult_grazers += 1;
                } else {
                    counts.fawns += 1;
                }
            }
            Agent::Patch(patch) if patch.fully_grown => counts.fully_grown_patches += 1,
            Agent::Patch(_) => counts.juvenile_patches += 1,
        }
    }
    counts
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StepMetrics {
    pub step: usize,
    pub population: PopulationCounts,
    /// Food pool left over once every agent had its turn.
    pub grazer_food_pool: f64,
    /// Aggregate patch health left over after the consumption pass.
    pub aggregate_patch_health: f64,
    pub birth_count: usize,
    pub deaths: DeathCounters,
}

/// Parameters echoed in the text report.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ReportParameters {
    pub width: usize,
    pub height: usize,
    pub population_control: f64,
    pub required_energy: u32,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub steps: usize,
    pub sample_every: usize,
    pub parameters: ReportParameters,
    pub initial: PopulationCounts,
    pub final_population: PopulationCounts,
    pub deaths: DeathCounters,
    #[serde(default)]
    pub total_births: usize,
    pub samples: Vec<StepMetrics>,
}

impl RunSummary {
    /// Plain-text results report: starting state, key parameters, final state and every
    /// death-cause total.
    pub fn render_report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let initial = &self.initial;
        let last = &self.final_population;
        let deaths = &self.deaths;
        let params = &self.parameters;
        writeln!(f, "Initial number grazers: {}", initial.grazers)?;
        writeln!(
            f,
            "Initial number grown patches: {}",
            initial.fully_grown_patches
        )?;
        writeln!(
            f,
            "Initial number juvenile patches: {}",
            initial.juvenile_patches
        )?;
        writeln!(f, "Initial population control: {}", params.population_control)?;
        writeln!(f, "Initial grazer food req: {}", params.required_energy)?;
        writeln!(f, "Dimensions: {}x{}", params.height, params.width)?;
        writeln!(f)?;
        writeln!(f, "Steps run: {}", self.steps)?;
        writeln!(f, "Final number grazers: {}", last.grazers)?;
        writeln!(f, "Final number grown patches: {}", last.fully_grown_patches)?;
        writeln!(f, "Final number juvenile patches: {}", last.juvenile_patches)?;
        writeln!(f, "Total births: {}", self.total_births)?;
        writeln!(f)?;
        writeln!(f, "Patch Natural Death: {}", deaths.patch_natural)?;
        writeln!(f, "Patch Frayed Death: {}", deaths.patch_frayed)?;
        writeln!(f, "Patch Eaten Death: {}", deaths.patch_eaten)?;
        writeln!(f)?;
        writeln!(
            f,
            "Population Control Deaths: {}",
            deaths.grazer_population_control
        )?;
        writeln!(f, "Grazer Starvation Death: {}", deaths.grazer_starvation)?;
        writeln!(f, "Fawn Mortality Death: {}", deaths.fawn_mortality)?;
        writeln!(f, "Adult Mortality Death: {}", deaths.adult_mortality)
    }
}
