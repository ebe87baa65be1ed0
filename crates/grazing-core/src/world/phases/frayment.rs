use super::super::World;
use crate::agent::{Agent, AgentId, AgentKind};
use crate::config::in_season;
use crate::constants::{FRAY_BASE_INTENSITY, FRAY_DENSITY_SLOPE, FRAY_RATE_PER_ADULT};
use rand::seq::SliceRandom;
use tracing::debug;

/// Patches destroyed by antler rubbing in one in-season step, given the adult head count.
/// Rounded half-to-even.
pub fn fray_casualties(adult_grazers: usize) -> u64 {
    let adults = adult_grazers as f64;
    (FRAY_RATE_PER_ADULT * adults * (FRAY_BASE_INTENSITY + FRAY_DENSITY_SLOPE * adults))
        .round_ties_even()
        .max(0.0) as u64
}

impl World {
    /// Inside a fray window, zero the health of randomly chosen frayable patches. The
    /// patches themselves are removed at their own death check.
    ///
    /// The frayed counter is charged the full casualty figure even when fewer patches
    /// were available.
    pub(in crate::world) fn step_frayment_phase(&mut self) {
        if self.famine || !in_season(&self.config.fray_windows, self.step_index) {
            return;
        }
        let adults = self.count_by_kind(AgentKind::Grazer, |agent| {
            agent.as_grazer().is_some_and(|g| g.is_adult())
        });
        let casualties = fray_casualties(adults);
        self.deaths.patch_frayed += casualties;

        let mut eligible: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|(_, agent)| agent.as_patch().is_some_and(|p| p.can_be_frayed()))
            .map(|(id, _)| id)
            .collect();
        eligible.shuffle(&mut self.rng);

        let frayed = eligible.len().min(casualties as usize);
        for &id in &eligible[..frayed] {
            if let Some(patch) = self.agents.get_mut(id).and_then(Agent::as_patch_mut) {
                patch.health = 0;
            }
        }
        debug!(
            step = self.step_index,
            adults, casualties, frayed, "frayment pass"
        );
    }
}
