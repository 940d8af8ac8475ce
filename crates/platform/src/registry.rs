use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use cubicworld_core::Platform;
use cubicworld_world::WorldFormatError;

use crate::{PlatformProvider, RegistryError};

/// What a plugin hands the host at startup.
#[derive(Clone)]
pub struct PlatformRegistration {
    /// Plugin name, for diagnostics.
    pub plugin_name: &'static str,
    /// Plugin version, for diagnostics.
    pub version: &'static str,
    /// Factories for the plugin's platforms.
    pub provider: Arc<dyn PlatformProvider>,
}

impl PlatformRegistration {
    /// Platforms this registration serves.
    pub fn platforms(&self) -> &[&'static Platform] {
        self.provider.platforms()
    }
}

impl fmt::Debug for PlatformRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<_> = self.platforms().iter().map(|p| p.id).collect();
        f.debug_struct("PlatformRegistration")
            .field("plugin_name", &self.plugin_name)
            .field("version", &self.version)
            .field("platforms", &ids)
            .finish()
    }
}

/// Host-side registry of platform providers keyed by platform id.
#[derive(Debug, Default)]
pub struct PlatformRegistry {
    registrations: Vec<PlatformRegistration>,
    by_id: BTreeMap<&'static str, usize>,
}

impl PlatformRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registration. Fails without changing the registry when any of its
    /// platforms is already registered.
    pub fn register(&mut self, registration: PlatformRegistration) -> Result<(), RegistryError> {
        for platform in registration.platforms() {
            if let Some(&idx) = self.by_id.get(platform.id) {
                return Err(RegistryError::DuplicatePlatform {
                    id: platform.id.to_string(),
                    plugin: self.registrations[idx].plugin_name.to_string(),
                });
            }
        }
        let idx = self.registrations.len();
        for platform in registration.platforms() {
            self.by_id.insert(platform.id, idx);
        }
        tracing::info!(
            plugin = registration.plugin_name,
            version = registration.version,
            platforms = registration.platforms().len(),
            "registered platform provider"
        );
        self.registrations.push(registration);
        Ok(())
    }

    /// Number of registered platforms.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Provider serving `platform`.
    pub fn provider_for(&self, platform: &Platform) -> Option<&Arc<dyn PlatformProvider>> {
        self.by_id
            .get(platform.id)
            .map(|&idx| &self.registrations[idx].provider)
    }

    /// Look a platform up by id.
    pub fn platform_by_id(&self, id: &str) -> Option<&'static Platform> {
        let &idx = self.by_id.get(id)?;
        self.registrations[idx]
            .platforms()
            .iter()
            .copied()
            .find(|platform| platform.id == id)
    }

    /// Every registered platform, ordered by id.
    pub fn platforms(&self) -> impl Iterator<Item = &'static Platform> + '_ {
        self.by_id
            .keys()
            .filter_map(move |id| self.platform_by_id(id))
    }

    /// Ask every provider's recognizer whether `dir` is one of its saves.
    /// Returns the first matching platform.
    pub fn recognize(&self, dir: &Path) -> Result<Option<&'static Platform>, WorldFormatError> {
        for registration in &self.registrations {
            let recognizer = registration.provider.map_recognizer();
            if recognizer.is_map(dir)? {
                return Ok(Some(recognizer.platform()));
            }
        }
        Ok(None)
    }
}
