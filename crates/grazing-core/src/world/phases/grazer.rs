use super::super::World;
use crate::agent::{Agent, AgentId};
use crate::config::in_season;
use crate::grazer::{draw_meal, Grazer};
use crate::patch::Patch;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::trace;

impl World {
    /// One grazer turn: move, refresh the breeding flag, feed, then the starvation,
    /// reproduction and mortality checks. Any death ends the turn.
    pub(in crate::world) fn step_grazer(&mut self, id: AgentId) {
        let destination = self.grid.random_cell(&mut self.rng);
        self.grid.place(id, destination);

        let movement_cost = f64::from(self.config.movement_cost());
        let in_breeding_season = in_season(&self.config.reproduction_windows, self.step_index);
        let can_feed = self.pools.has_food()
            && self
                .agents
                .values()
                .any(|agent| agent.as_patch().is_some_and(Patch::is_forage));

        let Some(grazer) = self.agents.get_mut(id).and_then(Agent::as_grazer_mut) else {
            return;
        };
        grazer.energy -= movement_cost;
        grazer.reproduction_eligible = in_breeding_season;

        if can_feed {
            let required = self.config.required_energy;
            let meal = f64::from(draw_meal(&mut self.rng, required, self.config.feed_variation));
            let gain = if grazer.is_satiated(required, self.config.satiation_factor) {
                0.0
            } else {
                meal
            };
            grazer.energy += self.pools.take_food(gain);
        }

        let starving = grazer.is_starving();
        let breeding = grazer.reproduction_eligible;
        let is_juvenile = grazer.is_juvenile;

        if starving {
            self.destroy(id);
            self.deaths.grazer_starvation += 1;
            return;
        }

        if breeding && self.rng.random_bool(self.config.grazer_reproduce) {
            self.give_birth(id);
            if self.rng.random_bool(self.config.second_birth_probability) {
                self.give_birth(id);
            }
        }

        if !is_juvenile && self.rng.random_bool(self.config.grazer_mortality) {
            self.destroy(id);
            self.deaths.adult_mortality += 1;
            return;
        }
        if is_juvenile && self.rng.random_bool(self.config.fawn_mortality) {
            self.destroy(id);
            self.deaths.fawn_mortality += 1;
            return;
        }
        if self.rng.random_bool(self.config.population_control) {
            self.destroy(id);
            self.deaths.grazer_population_control += 1;
        }
    }

    /// Drop a fawn into a random empty cell around the parent. No empty cell, no birth.
    fn give_birth(&mut self, parent: AgentId) {
        let Some(pos) = self.grid.position(parent) else {
            return;
        };
        let Some(offspring) = self
            .agents
            .get(parent)
            .and_then(Agent::as_grazer)
            .map(Grazer::offspring)
        else {
            return;
        };
        let empty = self.grid.empty_neighbors(pos);
        let Some(&cell) = empty.choose(&mut self.rng) else {
            return;
        };
        let child = self.spawn_grazer(cell, offspring);
        self.births_last_step += 1;
        self.total_births += 1;
        trace!(?parent, ?child, x = cell.x, y = cell.y, "fawn born");
    }
}
