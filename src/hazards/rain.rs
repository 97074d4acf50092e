//! Hazards domain: acid rain timing.

/// Pause after the rain stops before the trap can be set off again.
pub const RAIN_COOLDOWN: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainSettings {
    pub duration: f32,
    pub drop_frequency: f32,
}

impl RainSettings {
    /// Drops each cloud releases over one shower.
    pub fn drops_per_cloud(&self) -> u32 {
        if !(self.duration > 0.0 && self.drop_frequency > 0.0) {
            return 0;
        }
        (self.duration / self.drop_frequency).floor() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RainStage {
    #[default]
    Dry,
    Raining {
        elapsed: f32,
        waves: u32,
    },
    Clearing {
        remaining: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RainStep {
    /// Drop waves due this tick; each wave is one drop per cloud.
    pub waves: u32,
    /// The shower ended and clouds go back to their normal colour.
    pub clouds_restored: bool,
    /// Cooldown over; the trap may be set off again.
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RainCycle {
    settings: RainSettings,
    stage: RainStage,
}

impl RainCycle {
    pub fn new(settings: RainSettings) -> Self {
        Self {
            settings,
            stage: RainStage::Dry,
        }
    }

    pub fn stage(&self) -> RainStage {
        self.stage
    }

    pub fn settings(&self) -> RainSettings {
        self.settings
    }

    pub fn is_active(&self) -> bool {
        self.stage != RainStage::Dry
    }

    /// Starts a shower. Returns false if one is already running or cooling down.
    pub fn start(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.stage = RainStage::Raining {
            elapsed: 0.0,
            waves: 0,
        };
        true
    }

    pub fn advance(&mut self, dt: f32) -> RainStep {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut step = RainStep::default();

        match self.stage {
            RainStage::Dry => {}
            RainStage::Raining { elapsed, waves } => {
                let total = self.settings.drops_per_cloud();
                let mut waves = waves;
                // Wave k is due at k * frequency.
                while waves < total && waves as f32 * self.settings.drop_frequency <= elapsed {
                    waves += 1;
                    step.waves += 1;
                }

                let elapsed = elapsed + dt;
                if elapsed >= self.settings.duration && waves >= total {
                    self.stage = RainStage::Clearing {
                        remaining: RAIN_COOLDOWN,
                    };
                    step.clouds_restored = true;
                } else {
                    self.stage = RainStage::Raining { elapsed, waves };
                }
            }
            RainStage::Clearing { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.stage = RainStage::Dry;
                    step.finished = true;
                } else {
                    self.stage = RainStage::Clearing { remaining };
                }
            }
        }

        step
    }

    pub fn reset(&mut self) {
        self.stage = RainStage::Dry;
    }
}
