use crate::agent::{Agent, AgentId, AgentKind};
use crate::config::{SimConfig, SimConfigError};
use crate::grazer::Grazer;
use crate::grid::{Grid, GridPos};
use crate::metrics::{
    population_counts, DeathCounters, PopulationCounts, ReportParameters, RunSummary, StepMetrics,
};
use crate::patch::Patch;
use crate::resource::ResourcePools;
use crate::rng::create_rng;
use rand_chacha::ChaCha12Rng;
use slotmap::SlotMap;
use std::time::Instant;
use std::{error::Error, fmt};
use tracing::info;

mod phases;
mod populate;

pub use phases::frayment::fray_casualties;

#[derive(Clone, Debug)]
pub struct StepTimings {
    pub pools_us: u64,
    pub activation_us: u64,
    pub total_us: u64,
}

/// Simulation context: every agent, the lattice they live on, the per-step pools and the
/// cumulative death counters, all driven by a single seeded RNG.
pub struct World {
    agents: SlotMap<AgentId, Agent>,
    grid: Grid,
    pools: ResourcePools,
    deaths: DeathCounters,
    config: SimConfig,
    rng: ChaCha12Rng,
    step_index: usize,
    /// No consumable patch survived the consumption pass this step.
    famine: bool,
    births_last_step: usize,
    total_births: usize,
    total_created: usize,

    activation_buffer: Vec<AgentId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorldInitError {
    Config(SimConfigError),
    PlacementExhausted {
        kind: &'static str,
        placed: usize,
        requested: usize,
    },
}

impl fmt::Display for WorldInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldInitError::Config(e) => write!(f, "{}", e),
            WorldInitError::PlacementExhausted {
                kind,
                placed,
                requested,
            } => write!(
                f,
                "placed only {placed} of {requested} {kind} patches before running out of attempts"
            ),
        }
    }
}

impl From<SimConfigError> for WorldInitError {
    fn from(err: SimConfigError) -> Self {
        WorldInitError::Config(err)
    }
}

impl Error for WorldInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorldInitError::Config(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperimentError {
    InvalidSampleEvery,
    TooManySteps { max: usize, actual: usize },
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentError::InvalidSampleEvery => write!(f, "sample_every must be positive"),
            ExperimentError::TooManySteps { max, actual } => {
                write!(f, "steps ({actual}) exceed supported maximum ({max})")
            }
        }
    }
}

impl Error for ExperimentError {}

impl World {
    pub const MAX_EXPERIMENT_STEPS: usize = 1_000_000;

    /// Validate `config` and seed the lattice with patches and grazers.
    pub fn new(config: SimConfig) -> Result<Self, WorldInitError> {
        let mut world = Self::empty(config)?;
        world.populate()?;
        info!(
            grazers = world.count_kind(AgentKind::Grazer),
            patches = world.count_kind(AgentKind::Patch),
            width = world.grid.width(),
            height = world.grid.height(),
            "world initialised"
        );
        Ok(world)
    }

    /// Validated world with no agents.
    pub fn empty(config: SimConfig) -> Result<Self, SimConfigError> {
        config.validate()?;
        Ok(Self {
            agents: SlotMap::with_key(),
            grid: Grid::new(config.width, config.height),
            pools: ResourcePools::default(),
            deaths: DeathCounters::default(),
            rng: create_rng(config.seed),
            config,
            step_index: 0,
            famine: false,
            births_last_step: 0,
            total_births: 0,
            total_created: 0,
            activation_buffer: Vec::new(),
        })
    }

    pub fn spawn_grazer(&mut self, pos: GridPos, grazer: Grazer) -> AgentId {
        self.register(pos, grazer.into())
    }

    pub fn spawn_patch(&mut self, pos: GridPos, patch: Patch) -> AgentId {
        self.register(pos, patch.into())
    }

    fn register(&mut self, pos: GridPos, agent: Agent) -> AgentId {
        let id = self.agents.insert(agent);
        self.grid.place(id, pos);
        self.total_created += 1;
        id
    }

    /// Remove an agent from both the liveness map and the lattice.
    fn destroy(&mut self, id: AgentId) -> Option<Agent> {
        self.grid.remove(id);
        self.agents.remove(id)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pools(&self) -> &ResourcePools {
        &self.pools
    }

    pub fn deaths(&self) -> DeathCounters {
        self.deaths
    }

    /// Index of the next step to execute; also the number of steps already run.
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn is_famine(&self) -> bool {
        self.famine
    }

    pub fn is_finished(&self) -> bool {
        self.step_index >= self.config.max_steps
    }

    pub fn births_last_step(&self) -> usize {
        self.births_last_step
    }

    pub fn total_births(&self) -> usize {
        self.total_births
    }

    /// Every agent ever registered, including the ones seeded at init.
    pub fn total_agents_created(&self) -> usize {
        self.total_created
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id)
    }

    pub fn agents(&self) -> impl Iterator<Item = (AgentId, &Agent)> + '_ {
        self.agents.iter()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn count_kind(&self, kind: AgentKind) -> usize {
        self.count_by_kind(kind, |_| true)
    }

    /// Live agents of `kind` for which `predicate` holds.
    pub fn count_by_kind<F>(&self, kind: AgentKind, predicate: F) -> usize
    where
        F: Fn(&Agent) -> bool,
    {
        self.agents
            .values()
            .filter(|agent| agent.kind() == kind && predicate(agent))
            .count()
    }

    pub fn population(&self) -> PopulationCounts {
        population_counts(self.agents.values())
    }

    pub fn step_metrics(&self) -> StepMetrics {
        StepMetrics {
            step: self.step_index,
            population: self.population(),
            grazer_food_pool: self.pools.grazer_food_pool(),
            aggregate_patch_health: self.pools.aggregate_patch_health(),
            birth_count: self.births_last_step,
            deaths: self.deaths,
        }
    }

    fn report_parameters(&self) -> ReportParameters {
        ReportParameters {
            width: self.config.width,
            height: self.config.height,
            population_control: self.config.population_control,
            required_energy: self.config.required_energy,
        }
    }

    /// Run `steps` steps and sample metrics every `sample_every` steps.
    ///
    /// # Panics
    ///
    /// Panics if the arguments are rejected by [`World::try_run_experiment`].
    pub fn run_experiment(&mut self, steps: usize, sample_every: usize) -> RunSummary {
        self.try_run_experiment(steps, sample_every)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_run_experiment(
        &mut self,
        steps: usize,
        sample_every: usize,
    ) -> Result<RunSummary, ExperimentError> {
        if sample_every == 0 {
            return Err(ExperimentError::InvalidSampleEvery);
        }
        if steps > Self::MAX_EXPERIMENT_STEPS {
            return Err(ExperimentError::TooManySteps {
                max: Self::MAX_EXPERIMENT_STEPS,
                actual: steps,
            });
        }
        let estimated_samples = if steps == 0 {
            0
        } else {
            ((steps - 1) / sample_every) + 1
        };

        info!(steps, sample_every, start = self.step_index, "experiment started");
        let initial = self.population();
        let births_before = self.total_births;
        let mut samples = Vec::with_capacity(estimated_samples);
        for step in 1..=steps {
            self.step();
            if step % sample_every == 0 || step == steps {
                samples.push(self.step_metrics());
            }
        }
        let final_population = self.population();
        info!(
            grazers = final_population.grazers,
            patches = final_population.total_patches(),
            deaths = self.deaths.total(),
            "experiment finished"
        );
        Ok(RunSummary {
            schema_version: 1,
            steps,
            sample_every,
            parameters: self.report_parameters(),
            initial,
            final_population,
            deaths: self.deaths,
            total_births: self.total_births - births_before,
            samples,
        })
    }

    /// Run whatever is left of `max_steps`.
    pub fn run_to_completion(&mut self, sample_every: usize) -> Result<RunSummary, ExperimentError> {
        let remaining = self.config.max_steps.saturating_sub(self.step_index);
        self.try_run_experiment(remaining, sample_every)
    }

    /// Advance one step: pools, consumption, frayment, then every live agent once in a
    /// fresh random order.
    pub fn step(&mut self) -> StepTimings {
        let total_start = Instant::now();
        self.births_last_step = 0;

        let t0 = Instant::now();
        self.step_pool_phase();
        self.step_consumption_phase();
        self.step_frayment_phase();
        let pools_us = t0.elapsed().as_micros() as u64;

        let t1 = Instant::now();
        self.step_activation_phase();
        let activation_us = t1.elapsed().as_micros() as u64;

        self.step_index += 1;
        StepTimings {
            pools_us,
            activation_us,
            total_us: total_start.elapsed().as_micros() as u64,
        }
    }
}
