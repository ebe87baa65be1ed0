pub mod agent;
pub mod config;
pub mod constants;
pub mod grazer;
pub mod grid;
pub mod metrics;
pub mod patch;
pub mod resource;
pub mod rng;
pub mod world;

pub use agent::{Agent, AgentId, AgentKind};
pub use config::{SeasonWindow, SimConfig, SimConfigError};
pub use grid::{Grid, GridPos};
pub use metrics::{DeathCounters, PopulationCounts, RunSummary, StepMetrics};
pub use world::{ExperimentError, World, WorldInitError};
