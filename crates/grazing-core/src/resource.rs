/// Per-step population-level budgets.
///
/// Both pools are re-derived from the live grazer count at the start of every step and never
/// carry over. Withdrawals saturate at zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourcePools {
    /// Energy grazers may still gain this step.
    grazer_food_pool: f64,
    /// Patch health grazing may still remove this step.
    aggregate_patch_health: f64,
}

impl ResourcePools {
    pub fn new(grazer_food_pool: f64, aggregate_patch_health: f64) -> Self {
        Self {
            grazer_food_pool: grazer_food_pool.max(0.0),
            aggregate_patch_health: aggregate_patch_health.max(0.0),
        }
    }

    /// Size both pools for `live_grazers` and deduct the `other_food_fraction` of the
    /// aggregate health pool that is met by food outside the patches.
    pub fn recompute(&mut self, live_grazers: usize, required_energy: u32, other_food_fraction: f64) {
        let demand = live_grazers as f64 * required_energy as f64;
        self.grazer_food_pool = demand;
        self.aggregate_patch_health = (demand - demand * other_food_fraction).max(0.0);
    }

    pub fn grazer_food_pool(&self) -> f64 {
        self.grazer_food_pool
    }

    pub fn aggregate_patch_health(&self) -> f64 {
        self.aggregate_patch_health
    }

    pub fn has_food(&self) -> bool {
        self.grazer_food_pool > 0.0
    }

    pub fn has_patch_health(&self) -> bool {
        self.aggregate_patch_health > 0.0
    }

    /// Withdraw up to `amount` food and return the amount actually granted.
    pub fn take_food(&mut self, amount: f64) -> f64 {
        let granted = self.grazer_food_pool.min(amount.max(0.0));
        self.grazer_food_pool = (self.grazer_food_pool - granted).max(0.0);
        granted
    }

    /// Charge `amount` of grazing against the aggregate health pool.
    pub fn deplete_patch_health(&mut self, amount: f64) {
        self.aggregate_patch_health = (self.aggregate_patch_health - amount.max(0.0)).max(0.0);
    }

    /// Famine: nothing left to eat for the rest of the step.
    pub fn clear_food(&mut self) {
        self.grazer_food_pool = 0.0;
    }
}
