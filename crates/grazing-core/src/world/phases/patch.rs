use super::super::World;
use crate::agent::{Agent, AgentId};
use crate::patch::Growth;
use rand::Rng;
use tracing::trace;

impl World {
    /// Grow the patch, then run its death check. A patch stripped to zero health by the
    /// consumption or frayment pass is removed here; that death was already counted.
    pub(in crate::world) fn step_patch(&mut self, id: AgentId) {
        let regrowth_time = self.config.regrowth_time;
        let Some(patch) = self.agents.get_mut(id).and_then(Agent::as_patch_mut) else {
            return;
        };
        let growth = patch.advance_growth(regrowth_time);
        let depleted = patch.health == 0;

        if growth == Growth::Matured {
            trace!(?id, step = self.step_index, "patch matured");
        }
        if depleted {
            self.destroy(id);
            return;
        }
        if self.rng.random_bool(self.config.patch_natural_mortality) {
            self.destroy(id);
            self.deaths.patch_natural += 1;
        }
    }
}
