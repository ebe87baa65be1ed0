use super::super::World;
use crate::agent::AgentKind;
use rand::Rng;
use tracing::trace;

impl World {
    /// Size both pools from the live grazer count, net of the other-food share drawn for
    /// this step.
    pub(in crate::world) fn step_pool_phase(&mut self) {
        let live_grazers = self.count_kind(AgentKind::Grazer);
        let other_food = self
            .rng
            .random_range(self.config.other_food_min..=self.config.other_food_max);
        self.pools
            .recompute(live_grazers, self.config.required_energy, other_food);
        self.famine = false;
        trace!(
            step = self.step_index,
            live_grazers,
            other_food,
            food_pool = self.pools.grazer_food_pool(),
            patch_health = self.pools.aggregate_patch_health(),
            "pools recomputed"
        );
    }
}
