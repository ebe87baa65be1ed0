use super::super::World;
use crate::agent::{Agent, AgentKind};
use rand::seq::SliceRandom;

impl World {
    /// Activate every agent alive at the start of the phase exactly once, in a fresh
    /// random order. Agents born during the phase wait for the next step; agents destroyed
    /// before their turn are skipped.
    pub(in crate::world) fn step_activation_phase(&mut self) {
        let mut order = std::mem::take(&mut self.activation_buffer);
        order.clear();
        order.extend(self.agents.keys());
        order.shuffle(&mut self.rng);

        for &id in &order {
            match self.agents.get(id).map(Agent::kind) {
                Some(AgentKind::Grazer) => self.step_grazer(id),
                Some(AgentKind::Patch) => self.step_patch(id),
                None => {}
            }
        }
        self.activation_buffer = order;
    }
}
