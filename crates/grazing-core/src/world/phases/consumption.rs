use super::super::World;
use crate::agent::{Agent, AgentId};
use rand::Rng;
use tracing::debug;

impl World {
    /// Spend the aggregate health pool on random juvenile patches. A bite larger than what
    /// a patch has left strips it bare and drops it from the candidate list.
    ///
    /// Flags famine when no candidate is left afterwards; the food pool is then emptied
    /// for the rest of the step.
    pub(in crate::world) fn step_consumption_phase(&mut self) {
        let mut eligible: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|(_, agent)| agent.as_patch().is_some_and(|p| p.is_consumable()))
            .map(|(id, _)| id)
            .collect();
        let required = self.config.required_energy;

        while self.pools.has_patch_health() && !eligible.is_empty() {
            let eaten = u64::from(self.rng.random_range(0..required));
            let slot = self.rng.random_range(0..eligible.len());
            let Some(patch) = self
                .agents
                .get_mut(eligible[slot])
                .and_then(Agent::as_patch_mut)
            else {
                eligible.swap_remove(slot);
                continue;
            };
            if eaten > patch.health {
                let remaining = patch.health;
                patch.take_health(remaining);
                self.pools.deplete_patch_health(remaining as f64);
                self.deaths.patch_eaten += 1;
                eligible.swap_remove(slot);
            } else {
                patch.take_health(eaten);
                self.pools.deplete_patch_health(eaten as f64);
            }
        }

        if eligible.is_empty() {
            self.famine = true;
            self.pools.clear_food();
            debug!(step = self.step_index, "famine: no consumable patches left");
        }
    }
}
