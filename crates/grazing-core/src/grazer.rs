use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct Grazer {
    /// Stored energy. Dips below zero only between the movement cost and the starvation check.
    pub energy: f64,
    /// Born during the run ("fawn"); subject to fawn mortality instead of adult mortality.
    pub is_juvenile: bool,
    /// Recomputed every step from the season windows.
    pub reproduction_eligible: bool,
}

impl Grazer {
    pub fn adult(energy: f64) -> Self {
        Self {
            energy,
            is_juvenile: false,
            reproduction_eligible: false,
        }
    }

    pub fn fawn(energy: f64) -> Self {
        Self {
            energy,
            is_juvenile: true,
            reproduction_eligible: false,
        }
    }

    /// Offspring seeded with half of the parent's current energy. The parent keeps its own.
    pub fn offspring(&self) -> Self {
        Self::fawn(self.energy / 2.0)
    }

    pub fn is_adult(&self) -> bool {
        !self.is_juvenile
    }

    pub fn is_starving(&self) -> bool {
        self.energy < 0.0
    }

    /// At or above the satiation cap, feeding yields nothing.
    pub fn is_satiated(&self, required_energy: u32, satiation_factor: f64) -> bool {
        self.energy >= satiation_factor * required_energy as f64
    }
}

/// Draw one meal: an integer uniformly in `[required - spread, required + spread)` where
/// `spread = floor(required * variation)`. A zero spread yields exactly `required`.
pub fn draw_meal<R: Rng + ?Sized>(rng: &mut R, required_energy: u32, variation: f64) -> u32 {
    let spread = (required_energy as f64 * variation).floor() as u32;
    if spread == 0 {
        return required_energy;
    }
    rng.random_range(required_energy - spread..required_energy.saturating_add(spread))
}
