//! Pass configuration.

/// Options controlling delegate-conversion caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Whether caching is enabled at all. When disabled every conversion is
    /// emitted unchanged (the language-version gate).
    pub enabled: bool,
    /// Maximum number of cells per container. A full container is sealed and
    /// the next new cell in the same group opens a fresh container.
    pub max_cells_per_container: Option<usize>,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            max_cells_per_container: None,
        }
    }
}

impl CacheOptions {
    /// Options with caching turned off.
    pub fn disabled() -> Self {
        Self::default().with_enabled(false)
    }

    /// Enable or disable caching.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Limit the number of cells per container. A limit of zero is treated as one.
    pub fn with_max_cells_per_container(mut self, max: usize) -> Self {
        self.max_cells_per_container = Some(max.max(1));
        self
    }
}
