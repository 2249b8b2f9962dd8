//! Platform registry - lookup table for configured platforms

use std::collections::HashMap;

use contracts::{ContractError, PlatformConfig, PlatformId};

/// Registry of configured platforms
///
/// Write-once at startup: platforms are registered while loading the
/// blueprint and the set never changes afterwards. Duplicate ids are
/// rejected at registration, unknown ids at lookup.
#[derive(Debug, Default)]
pub struct PlatformRegistry {
    platforms: HashMap<PlatformId, PlatformConfig>,
}

impl PlatformRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of platform configurations
    ///
    /// # Errors
    /// Returns `DuplicatePlatform` if two configurations share an id.
    pub fn from_configs(
        configs: impl IntoIterator<Item = PlatformConfig>,
    ) -> Result<Self, ContractError> {
        let mut registry = Self::new();
        for config in configs {
            registry.register(config)?;
        }
        Ok(registry)
    }

    /// Register a platform
    ///
    /// # Errors
    /// Returns `DuplicatePlatform` if the id is already registered.
    pub fn register(&mut self, config: PlatformConfig) -> Result<(), ContractError> {
        if self.platforms.contains_key(&config.id) {
            return Err(ContractError::duplicate_platform(config.id));
        }
        self.platforms.insert(config.id.clone(), config);
        Ok(())
    }

    /// Look up a platform by id
    ///
    /// # Errors
    /// Returns `UnknownPlatform` if the id is not registered.
    pub fn get(&self, id: &PlatformId) -> Result<&PlatformConfig, ContractError> {
        self.platforms
            .get(id)
            .ok_or_else(|| ContractError::unknown_platform(id.clone()))
    }

    /// Whether a platform id is registered
    pub fn contains(&self, id: &PlatformId) -> bool {
        self.platforms.contains_key(id)
    }

    /// All registered platform ids, sorted for deterministic iteration
    pub fn all_ids(&self) -> Vec<PlatformId> {
        let mut ids: Vec<PlatformId> = self.platforms.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// All registered configurations, sorted by platform id
    pub fn configs(&self) -> Vec<&PlatformConfig> {
        let mut configs: Vec<&PlatformConfig> = self.platforms.values().collect();
        configs.sort_by(|a, b| a.id.cmp(&b.id));
        configs
    }

    /// Number of registered platforms
    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}
