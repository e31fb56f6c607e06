//! Registry of named colormaps.

use std::collections::BTreeMap;
use std::path::Path;

use nansat_common::{NansatError, NansatResult};

use crate::builtin::{builtin_segments, BUILTIN_NAMES};
use crate::colormap::{Colormap, SegmentData, DEFAULT_LUT_SIZE};

/// A colormap that could not be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationFailure {
    pub name: String,
    pub reason: String,
}

/// Outcome of registering a batch of colormaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStatus {
    /// Every colormap was registered
    Complete,
    /// Some colormaps are missing; the others are usable
    Degraded(Vec<RegistrationFailure>),
}

impl RegistrationStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, RegistrationStatus::Complete)
    }

    fn from_failures(failures: Vec<RegistrationFailure>) -> Self {
        if failures.is_empty() {
            RegistrationStatus::Complete
        } else {
            RegistrationStatus::Degraded(failures)
        }
    }
}

/// Named colormaps available for rendering.
///
/// Registering a name twice with the same definition and table size is a
/// no-op. Registering it with a different definition is an error and leaves
/// the existing colormap in place.
#[derive(Debug, Clone, Default)]
pub struct ColormapRegistry {
    colormaps: BTreeMap<String, Colormap>,
}

impl ColormapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in colormaps.
    ///
    /// Failures are logged and reported in the status; the registry still
    /// holds every colormap that did register.
    pub fn with_builtin() -> (Self, RegistrationStatus) {
        let mut registry = Self::new();
        let mut failures = Vec::new();

        for name in BUILTIN_NAMES {
            let result = builtin_segments(name)
                .ok_or_else(|| NansatError::Registration(format!("no definition for '{}'", name)))
                .and_then(|segments| registry.register(name, segments, DEFAULT_LUT_SIZE).map(|_| ()));

            if let Err(e) = result {
                failures.push(RegistrationFailure {
                    name: name.to_string(),
                    reason: e.to_string(),
                });
            }
        }

        let status = RegistrationStatus::from_failures(failures);
        registry.log_status(&status);
        (registry, status)
    }

    /// Register `segments` under `name` with a `lut`-entry lookup table.
    pub fn register(
        &mut self,
        name: &str,
        segments: SegmentData,
        lut: usize,
    ) -> NansatResult<&Colormap> {
        if name.trim().is_empty() {
            return Err(NansatError::Registration("colormap name is empty".to_string()));
        }

        if let Some(existing) = self.colormaps.get(name) {
            if existing.segments() == &segments && existing.len() == lut {
                tracing::debug!(colormap = %name, "Colormap already registered");
            } else {
                return Err(NansatError::Registration(format!(
                    "colormap '{}' is already registered with a different definition",
                    name
                )));
            }
        } else {
            let colormap = Colormap::from_segments(name, segments, lut)?;
            tracing::debug!(colormap = %name, lut, "Registered colormap");
            self.colormaps.insert(name.to_string(), colormap);
        }

        self.colormaps
            .get(name)
            .ok_or_else(|| NansatError::Registration(format!("colormap '{}' vanished", name)))
    }

    /// Register every colormap of a JSON object mapping names to segment data.
    ///
    /// ```json
    /// {"sea": {"red": [[0, 0, 0], [1, 1, 1]], "green": [...], "blue": [...]}}
    /// ```
    pub fn register_json(&mut self, json: &str) -> NansatResult<RegistrationStatus> {
        let definitions: BTreeMap<String, SegmentData> = serde_json::from_str(json)
            .map_err(|e| NansatError::Format(format!("colormap definitions: {}", e)))?;

        let mut failures = Vec::new();
        for (name, segments) in definitions {
            if let Err(e) = self.register(&name, segments, DEFAULT_LUT_SIZE) {
                failures.push(RegistrationFailure {
                    name,
                    reason: e.to_string(),
                });
            }
        }

        let status = RegistrationStatus::from_failures(failures);
        self.log_status(&status);
        Ok(status)
    }

    /// Load colormap definitions from a JSON file.
    pub fn register_file(&mut self, path: impl AsRef<Path>) -> NansatResult<RegistrationStatus> {
        let content = std::fs::read_to_string(path)?;
        self.register_json(&content)
    }

    pub fn get(&self, name: &str) -> Option<&Colormap> {
        self.colormaps.get(name)
    }

    /// Look up a colormap, failing with an option error when it is missing.
    pub fn require(&self, name: &str) -> NansatResult<&Colormap> {
        self.get(name).ok_or_else(|| {
            NansatError::Option(format!(
                "unknown colormap '{}', available: {}",
                name,
                self.names().collect::<Vec<_>>().join(", ")
            ))
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.colormaps.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colormaps.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colormaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colormaps.is_empty()
    }

    fn log_status(&self, status: &RegistrationStatus) {
        match status {
            RegistrationStatus::Complete => {
                tracing::debug!(count = self.len(), "Colormaps registered");
            }
            RegistrationStatus::Degraded(failures) => {
                for failure in failures {
                    tracing::warn!(
                        colormap = %failure.name,
                        reason = %failure.reason,
                        "Cannot register colormap"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;

    #[test]
    fn test_builtin_registration_is_complete() {
        let (registry, status) = ColormapRegistry::with_builtin();
        assert!(status.is_complete());
        for name in BUILTIN_NAMES {
            assert!(registry.contains(name), "missing {}", name);
            assert_eq!(registry.get(name).unwrap().len(), DEFAULT_LUT_SIZE);
        }
    }

    #[test]
    fn test_identical_reregistration_is_noop() {
        let mut registry = ColormapRegistry::new();
        registry.register("obpg", builtin::obpg(), 256).unwrap();
        registry.register("obpg", builtin::obpg(), 256).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_conflicting_registration_fails() {
        let mut registry = ColormapRegistry::new();
        registry.register("ocean", builtin::obpg(), 256).unwrap();

        let err = registry.register("ocean", builtin::ak01(), 256).unwrap_err();
        assert!(matches!(err, NansatError::Registration(_)));

        let err = registry.register("ocean", builtin::obpg(), 64).unwrap_err();
        assert!(matches!(err, NansatError::Registration(_)));

        // The original definition survives.
        assert_eq!(registry.get("ocean").unwrap().segments(), &builtin::obpg());
    }

    #[test]
    fn test_require_unknown() {
        let (registry, _) = ColormapRegistry::with_builtin();
        let err = registry.require("viridis").unwrap_err();
        assert!(matches!(err, NansatError::Option(_)));
        assert!(err.to_string().contains("jet"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut registry = ColormapRegistry::new();
        assert!(registry.register(" ", builtin::gray(), 256).is_err());
    }
}
