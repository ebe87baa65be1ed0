use super::{World, WorldInitError};
use crate::agent::{Agent, AgentId};
use crate::grazer::Grazer;
use crate::grid::{Grid, GridPos};
use crate::patch::Patch;
use rand::Rng;
use slotmap::SlotMap;
use tracing::debug;

impl World {
    /// Seed the lattice: spaced-out mature patches first, juveniles kept clear of them,
    /// then the founding grazers anywhere.
    pub(in crate::world) fn populate(&mut self) -> Result<(), WorldInitError> {
        if self.config.enable_patches {
            self.seed_grown_patches()?;
            self.seed_juvenile_patches()?;
        }
        self.seed_grazers();
        Ok(())
    }

    fn seed_grown_patches(&mut self) -> Result<(), WorldInitError> {
        let requested = self.config.initial_grown_patches;
        let regrowth_time = self.config.regrowth_time;
        let mut budget = self.config.max_placement_attempts;
        for placed in 0..requested {
            let cell = self
                .sample_cell(&mut budget, |grid, _, cell| {
                    grid.neighbors(cell, true)
                        .into_iter()
                        .all(|pos| grid.is_empty(pos))
                })
                .ok_or(WorldInitError::PlacementExhausted {
                    kind: "grown",
                    placed,
                    requested,
                })?;
            self.spawn_patch(cell, Patch::pre_grown(regrowth_time));
        }
        debug!(
            requested,
            attempts = self.config.max_placement_attempts - budget,
            "grown patches placed"
        );
        Ok(())
    }

    fn seed_juvenile_patches(&mut self) -> Result<(), WorldInitError> {
        let requested = self.config.initial_juvenile_patches;
        let regrowth_time = self.config.regrowth_time;
        let countdown_min = self.config.juvenile_countdown_min;
        let mut budget = self.config.max_placement_attempts;
        for placed in 0..requested {
            let cell = self
                .sample_cell(&mut budget, |grid, agents, cell| {
                    grid.is_empty(cell)
                        && !grid.neighbors(cell, true).into_iter().any(|pos| {
                            grid.occupants(pos).iter().any(|&id| {
                                agents
                                    .get(id)
                                    .and_then(Agent::as_patch)
                                    .is_some_and(|p| p.fully_grown)
                            })
                        })
                })
                .ok_or(WorldInitError::PlacementExhausted {
                    kind: "juvenile",
                    placed,
                    requested,
                })?;
            let countdown = self.rng.random_range(countdown_min..regrowth_time);
            self.spawn_patch(cell, Patch::juvenile(countdown, regrowth_time));
        }
        debug!(
            requested,
            attempts = self.config.max_placement_attempts - budget,
            "juvenile patches placed"
        );
        Ok(())
    }

    fn seed_grazers(&mut self) {
        let energy_ceiling = self.config.required_energy.saturating_mul(2);
        for _ in 0..self.config.initial_grazers {
            let cell = self.grid.random_cell(&mut self.rng);
            let energy = self.rng.random_range(0..energy_ceiling);
            self.spawn_grazer(cell, Grazer::adult(f64::from(energy)));
        }
    }

    /// Rejection-sample a uniformly random cell accepted by `accept`, spending one unit of
    /// `budget` per draw.
    fn sample_cell<F>(&mut self, budget: &mut usize, accept: F) -> Option<GridPos>
    where
        F: Fn(&Grid, &SlotMap<AgentId, Agent>, GridPos) -> bool,
    {
        while *budget > 0 {
            *budget -= 1;
            let cell = self.grid.random_cell(&mut self.rng);
            if accept(&self.grid, &self.agents, cell) {
                return Some(cell);
            }
        }
        None
    }
}
