use serde::{Deserialize, Serialize};

/// Inclusive range of step indices during which a seasonal behaviour is active.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeasonWindow {
    pub start: usize,
    pub end: usize,
}

impl SeasonWindow {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, step: usize) -> bool {
        (self.start..=self.end).contains(&step)
    }
}

/// True when `step` falls in any of `windows`.
pub fn in_season(windows: &[SeasonWindow], step: usize) -> bool {
    windows.iter().any(|w| w.contains(step))
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for reproducible simulation runs.
    pub seed: u64,
    /// Number of lattice columns. The lattice wraps toroidally.
    pub width: usize,
    /// Number of lattice rows.
    pub height: usize,
    /// Adult grazers placed at world initialisation.
    pub initial_grazers: usize,
    /// Seed patches at world initialisation.
    pub enable_patches: bool,
    /// Patches created already fully grown.
    pub initial_grown_patches: usize,
    /// Patches created as juveniles with a random countdown.
    pub initial_juvenile_patches: usize,
    /// Lower bound (inclusive) of the juvenile countdown draw.
    pub juvenile_countdown_min: u32,
    /// Days a patch needs to mature; also the upper bound (exclusive) of the juvenile
    /// countdown draw and the value the countdown resets to on maturity.
    pub regrowth_time: u32,
    /// Energy one grazer needs per day. Sizes both per-step pools.
    pub required_energy: u32,
    /// Relative spread of the per-feed energy draw around `required_energy`.
    pub feed_variation: f64,
    /// Grazers at or above `satiation_factor * required_energy` gain nothing from feeding.
    pub satiation_factor: f64,
    /// Lower bound of the per-step "other food sources" deduction fraction.
    pub other_food_min: f64,
    /// Upper bound of the per-step "other food sources" deduction fraction.
    pub other_food_max: f64,
    /// Per-step probability that an eligible grazer gives birth.
    pub grazer_reproduce: f64,
    /// Probability of a second offspring once a birth happened.
    pub second_birth_probability: f64,
    /// Per-step death probability for adult grazers.
    pub grazer_mortality: f64,
    /// Per-step death probability for juvenile grazers.
    pub fawn_mortality: f64,
    /// Per-step death probability applied to every grazer.
    pub population_control: f64,
    /// Per-step natural death probability for patches.
    pub patch_natural_mortality: f64,
    /// Step windows in which grazers are reproduction-eligible.
    pub reproduction_windows: Vec<SeasonWindow>,
    /// Step windows in which adult grazers fray patches.
    pub fray_windows: Vec<SeasonWindow>,
    /// Length of a reference run in steps.
    pub max_steps: usize,
    /// Rejection-sampling budget per patch kind during initialisation.
    pub max_placement_attempts: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: 406,
            height: 406,
            initial_grazers: 5,
            enable_patches: true,
            initial_grown_patches: 11_550,
            initial_juvenile_patches: 25_000,
            juvenile_countdown_min: 365,
            regrowth_time: 731,
            required_energy: 1345,
            feed_variation: 0.1,
            satiation_factor: 1.5,
            other_food_min: 0.09,
            other_food_max: 0.11,
            grazer_reproduce: 0.004505,
            second_birth_probability: 0.75,
            grazer_mortality: 0.0002189,
            fawn_mortality: 0.0009576,
            population_control: 0.0006839,
            patch_natural_mortality: 0.000_020_52,
            reproduction_windows: vec![SeasonWindow::new(90, 180), SeasonWindow::new(456, 546)],
            fray_windows: vec![SeasonWindow::new(59, 242), SeasonWindow::new(425, 608)],
            max_steps: 731,
            max_placement_attempts: 1_000_000,
        }
    }
}

macro_rules! define_sim_config_error {
    (
        $(
            $variant:ident $( { $($field:ident : $type:ty),* } )? => $fmt:literal $(, $arg:expr)*
        );* $(;)?
    ) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum SimConfigError {
            $(
                $variant $( { $($field : $type),* } )?,
            )*
        }

        impl std::fmt::Display for SimConfigError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant $( { $($field),* } )? => write!(f, $fmt $(, $arg)*),
                    )*
                }
            }
        }
    };
}

define_sim_config_error! {
    InvalidWidth => "width must be greater than 0";
    InvalidHeight => "height must be greater than 0";
    GridTooLarge { max: usize, width: usize, height: usize } => "grid {width}x{height} exceeds supported maximum edge ({max})";
    InvalidRequiredEnergy => "required_energy must be greater than 0";
    RequiredEnergyTooSmall { min: u32, actual: u32 } => "required_energy ({actual}) must be at least {min}";
    InvalidRegrowthTime => "regrowth_time must be greater than 0";
    InvalidJuvenileCountdownRange => "juvenile_countdown_min must be less than regrowth_time";
    InvalidFeedVariation => "feed_variation must be finite and within [0,1)";
    InvalidSatiationFactor => "satiation_factor must be finite and positive";
    InvalidOtherFoodRange => "other_food_min/other_food_max must be finite, within [0,1], and ordered";
    InvalidProbability { name: &'static str } => "{name} must be finite and within [0,1]";
    InvalidSeasonWindow { name: &'static str } => "{name} windows must have start <= end";
    InvalidMaxSteps => "max_steps must be greater than 0";
    InvalidMaxPlacementAttempts => "max_placement_attempts must be greater than 0";
}

impl std::error::Error for SimConfigError {}

impl SimConfig {
    pub const MAX_GRID_DIMENSION: usize = crate::constants::MAX_GRID_DIMENSION;
    pub const MIN_REQUIRED_ENERGY: u32 = crate::constants::MIN_REQUIRED_ENERGY;

    pub fn validate(&self) -> Result<(), SimConfigError> {
        self.validate_grid()?;
        self.validate_energy()?;
        self.validate_growth()?;
        self.validate_probabilities()?;
        self.validate_seasons()?;
        self.validate_run()?;
        Ok(())
    }

    fn validate_grid(&self) -> Result<(), SimConfigError> {
        if self.width == 0 {
            return Err(SimConfigError::InvalidWidth);
        }
        if self.height == 0 {
            return Err(SimConfigError::InvalidHeight);
        }
        if self.width > Self::MAX_GRID_DIMENSION || self.height > Self::MAX_GRID_DIMENSION {
            return Err(SimConfigError::GridTooLarge {
                max: Self::MAX_GRID_DIMENSION,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    fn validate_energy(&self) -> Result<(), SimConfigError> {
        if self.required_energy == 0 {
            return Err(SimConfigError::InvalidRequiredEnergy);
        }
        if self.required_energy < Self::MIN_REQUIRED_ENERGY {
            return Err(SimConfigError::RequiredEnergyTooSmall {
                min: Self::MIN_REQUIRED_ENERGY,
                actual: self.required_energy,
            });
        }
        if !(self.feed_variation.is_finite() && (0.0..1.0).contains(&self.feed_variation)) {
            return Err(SimConfigError::InvalidFeedVariation);
        }
        if !(self.satiation_factor.is_finite() && self.satiation_factor > 0.0) {
            return Err(SimConfigError::InvalidSatiationFactor);
        }
        if !(self.other_food_min.is_finite()
            && self.other_food_max.is_finite()
            && (0.0..=1.0).contains(&self.other_food_min)
            && (0.0..=1.0).contains(&self.other_food_max)
            && self.other_food_min <= self.other_food_max)
        {
            return Err(SimConfigError::InvalidOtherFoodRange);
        }
        Ok(())
    }

    fn validate_growth(&self) -> Result<(), SimConfigError> {
        if self.regrowth_time == 0 {
            return Err(SimConfigError::InvalidRegrowthTime);
        }
        if self.juvenile_countdown_min >= self.regrowth_time {
            return Err(SimConfigError::InvalidJuvenileCountdownRange);
        }
        Ok(())
    }

    fn validate_probabilities(&self) -> Result<(), SimConfigError> {
        let probabilities = [
            ("grazer_reproduce", self.grazer_reproduce),
            ("second_birth_probability", self.second_birth_probability),
            ("grazer_mortality", self.grazer_mortality),
            ("fawn_mortality", self.fawn_mortality),
            ("population_control", self.population_control),
            ("patch_natural_mortality", self.patch_natural_mortality),
        ];
        for (name, p) in probabilities {
            if !(p.is_finite() && (0.0..=1.0).contains(&p)) {
                return Err(SimConfigError::InvalidProbability { name });
            }
        }
        Ok(())
    }

    fn validate_seasons(&self) -> Result<(), SimConfigError> {
        if self.reproduction_windows.iter().any(|w| w.start > w.end) {
            return Err(SimConfigError::InvalidSeasonWindow {
                name: "reproduction",
            });
        }
        if self.fray_windows.iter().any(|w| w.start > w.end) {
            return Err(SimConfigError::InvalidSeasonWindow { name: "fray" });
        }
        Ok(())
    }

    fn validate_run(&self) -> Result<(), SimConfigError> {
        if self.max_steps == 0 {
            return Err(SimConfigError::InvalidMaxSteps);
        }
        if self.max_placement_attempts == 0 {
            return Err(SimConfigError::InvalidMaxPlacementAttempts);
        }
        Ok(())
    }

    /// Energy drained by one relocation.
    pub fn movement_cost(&self) -> u32 {
        self.required_energy / crate::constants::MOVEMENT_COST_DIVISOR
    }

    /// Total patches requested at initialisation.
    pub fn initial_patches(&self) -> usize {
        if self.enable_patches {
            self.initial_grown_patches + self.initial_juvenile_patches
        } else {
            0
        }
    }
}
