//! Stationary resource patches and their growth curve.
//!
//! Health follows `f(d) = 18.267 * 1.0063198^d` scaled by ten, where `d` is days since the
//! patch started growing. A juvenile gains the rounded marginal increment of the curve
//! each day until its countdown runs out, then flips to fully grown for good.

use crate::constants::{GROWTH_CURVE_BASE, GROWTH_CURVE_SCALE, HEALTH_PER_CURVE_UNIT};

/// Raw growth curve value after `day` days.
pub fn growth_curve(day: f64) -> f64 {
    GROWTH_CURVE_SCALE * GROWTH_CURVE_BASE.powf(day)
}

/// Health of a patch that has grown for `day` days, rounded half-to-even.
pub fn curve_health(day: u32) -> u64 {
    (growth_curve(day as f64) * HEALTH_PER_CURVE_UNIT)
        .round_ties_even()
        .max(0.0) as u64
}

/// Health gained on `day`: the rounded difference between consecutive curve values.
pub fn daily_increment(day: u32) -> u64 {
    let d = day as f64;
    ((growth_curve(d) - growth_curve(d - 1.0)) * HEALTH_PER_CURVE_UNIT)
        .round_ties_even()
        .max(0.0) as u64
}

/// Result of one growth update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Growth {
    /// Countdown ran out this step; the patch is now fully grown.
    Matured,
    /// Juvenile grew by the given health.
    Grew(u64),
    /// Juvenile with no health left; it is removed at the death check.
    Stalled,
    /// Already fully grown; nothing changes.
    Mature,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patch {
    pub fully_grown: bool,
    /// Set the first time the patch matures during a run. Never cleared.
    pub has_grown_ever: bool,
    /// Days left until maturity.
    pub countdown: u32,
    pub health: u64,
}

impl Patch {
    /// Juvenile patch `countdown` days away from maturity, with the health it would have
    /// accumulated by now.
    pub fn juvenile(countdown: u32, regrowth_time: u32) -> Self {
        Self {
            fully_grown: false,
            has_grown_ever: false,
            countdown,
            health: curve_health(regrowth_time.saturating_sub(countdown)),
        }
    }

    /// Patch seeded already at full size.
    pub fn pre_grown(regrowth_time: u32) -> Self {
        Self {
            fully_grown: true,
            has_grown_ever: false,
            countdown: regrowth_time,
            health: curve_health(regrowth_time),
        }
    }

    /// Juvenile with health left: what grazers feed on.
    pub fn is_forage(&self) -> bool {
        !self.fully_grown && self.health > 0
    }

    /// Candidate for the consumption pass.
    pub fn is_consumable(&self) -> bool {
        !self.fully_grown
    }

    /// Structurally exposed to frayment: juveniles and patches that matured during the
    /// run. Patches seeded fully grown are not.
    pub fn is_frayable(&self) -> bool {
        !self.fully_grown || self.has_grown_ever
    }

    /// Candidate for the frayment pass.
    pub fn can_be_frayed(&self) -> bool {
        self.is_frayable() && self.health > 0
    }

    /// Remove up to `amount` health and return what was actually taken.
    pub fn take_health(&mut self, amount: u64) -> u64 {
        let taken = self.health.min(amount);
        self.health -= taken;
        taken
    }

    /// Advance the growth state machine by one day.
    pub fn advance_growth(&mut self, regrowth_time: u32) -> Growth {
        if self.fully_grown {
            return Growth::Mature;
        }
        if self.countdown == 0 {
            self.fully_grown = true;
            self.has_grown_ever = true;
            self.countdown = regrowth_time;
            return Growth::Matured;
        }
        if self.health == 0 {
            return Growth::Stalled;
        }
        self.countdown -= 1;
        let day = regrowth_time.saturating_sub(self.countdown);
        let gain = daily_increment(day);
        self.health = self.health.saturating_add(gain);
        Growth::Grew(gain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_matches_reference_points() {
        assert_eq!(curve_health(0), 183);
        // 10 * 18.267 * 1.0063198^731 ≈ 18268.2
        assert_eq!(curve_health(731), 18268);
    }

    #[test]
    fn daily_increment_grows_with_age() {
        assert_eq!(daily_increment(1), 1);
        assert_eq!(daily_increment(332), 9);
        assert_eq!(daily_increment(731), 115);
    }

    #[test]
    fn juvenile_health_tracks_elapsed_days() {
        let patch = Patch::juvenile(365, 731);
        assert_eq!(patch.health, curve_health(366));
        assert!(!patch.fully_grown);
        assert!(patch.can_be_frayed());
        assert!(patch.is_forage());
    }

    #[test]
    fn pre_grown_patch_is_not_forage_or_frayable() {
        let patch = Patch::pre_grown(731);
        assert!(patch.fully_grown);
        assert!(!patch.has_grown_ever);
        assert_eq!(patch.countdown, 731);
        assert!(!patch.is_forage());
        assert!(!patch.is_consumable());
        assert!(!patch.can_be_frayed());
    }

    #[test]
    fn countdown_zero_matures_without_changing_health() {
        let mut patch = Patch {
            fully_grown: false,
            has_grown_ever: false,
            countdown: 0,
            health: 100,
        };
        assert_eq!(patch.advance_growth(731), Growth::Matured);
        assert!(patch.fully_grown);
        assert!(patch.has_grown_ever);
        assert_eq!(patch.countdown, 731);
        assert_eq!(patch.health, 100);

        assert_eq!(patch.advance_growth(731), Growth::Mature);
        assert!(patch.fully_grown);
        assert_eq!(patch.countdown, 731);
        assert!(patch.can_be_frayed());
    }

    #[test]
    fn frayment_eligibility_follows_growth_history() {
        let mut patch = Patch::juvenile(400, 731);
        assert!(patch.can_be_frayed());

        let mut seeded = Patch::pre_grown(731);
        assert!(!seeded.can_be_frayed());
        seeded.has_grown_ever = true;
        assert!(seeded.can_be_frayed());

        patch.health = 0;
        assert!(patch.is_frayable());
        assert!(!patch.can_be_frayed());
    }

    #[test]
    fn zero_health_juvenile_stalls() {
        let mut patch = Patch::juvenile(400, 731);
        patch.health = 0;
        assert_eq!(patch.advance_growth(731), Growth::Stalled);
        assert_eq!(patch.countdown, 400);
        assert_eq!(patch.health, 0);
    }

    #[test]
    fn growth_adds_marginal_curve_delta() {
        let mut patch = Patch::juvenile(400, 731);
        let before = patch.health;
        let outcome = patch.advance_growth(731);
        assert_eq!(patch.countdown, 399);
        assert_eq!(outcome, Growth::Grew(daily_increment(332)));
        assert_eq!(patch.health, before + daily_increment(332));
    }

    #[test]
    fn health_never_decreases_while_growing() {
        let mut patch = Patch::juvenile(730, 731);
        let mut last = patch.health;
        while !patch.fully_grown {
            patch.advance_growth(731);
            assert!(patch.health >= last);
            last = patch.health;
        }
    }

    #[test]
    fn take_health_saturates() {
        let mut patch = Patch::juvenile(400, 731);
        let health = patch.health;
        assert_eq!(patch.take_health(10), 10);
        assert_eq!(patch.take_health(u64::MAX), health - 10);
        assert_eq!(patch.health, 0);
        assert!(!patch.is_forage());
    }
}
