//! Engine configuration

/// Main engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Cache compiled plans per decision key; individual repositories may
    /// still opt out via `DecisionRepository::cache_enabled`
    pub cache_plans: bool,
}

impl EngineConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        EngineConfig { cache_plans: true }
    }

    /// Toggle plan caching
    pub fn with_cache_plans(mut self, enable: bool) -> Self {
        self.cache_plans = enable;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
