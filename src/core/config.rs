//! Engine configuration with documented constants
//!
//! The calendrical constants are fixed by classical convention; they are
//! collected here so the luck-cycle fallback values are visible as
//! defaults rather than buried magic numbers.

/// Configuration for the chart and luck-cycle engines
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Elapsed days between birth and the anchor Jie term per luck year
    ///
    /// The classical conversion rule: 3 days = 1 year (so 1 day = 4 months
    /// and one double-hour = 10 days).
    pub days_per_luck_year: f64,

    /// Number of ten-year periods emitted per luck cycle
    ///
    /// Eight periods cover roughly ages 0-89 from the starting age.
    pub decade_periods: usize,

    /// Starting age used when no bounding Jie term exists in the table
    ///
    /// Inherited default; it keeps the engine total (a chart is always
    /// returned) but may mask a solar-term table that does not span the
    /// birth year. The fallback is logged at warn level when taken.
    pub fallback_starting_age: f64,

    /// Start-year offset paired with the starting-age fallback
    pub fallback_start_year_offset: i32,

    /// Reference year aligning sexagenary index 0 to 甲子
    ///
    /// Year 4 CE. Both the year pillar and annual fates use this epoch,
    /// so a birth year's annual fate always equals its year pillar.
    pub sexagenary_epoch_year: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            days_per_luck_year: 3.0,
            decade_periods: 8,
            fallback_starting_age: 6.2,
            fallback_start_year_offset: 6,
            sexagenary_epoch_year: 4,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.days_per_luck_year <= 0.0 {
            return Err("days_per_luck_year must be positive".into());
        }
        if self.decade_periods == 0 {
            return Err("decade_periods must be at least 1".into());
        }
        if self.fallback_starting_age < 0.0 {
            return Err(format!(
                "fallback_starting_age ({}) must not be negative",
                self.fallback_starting_age
            ));
        }
        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Get the global engine config (initializes with defaults if not set)
pub fn config() -> &'static EngineConfig {
    CONFIG.get_or_init(EngineConfig::default)
}

/// Set the global engine config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EngineConfig) -> Result<(), EngineConfig> {
    CONFIG.set(config)
}
