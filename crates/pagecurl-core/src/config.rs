#![forbid(unsafe_code)]

//! Page-curl configuration as data.
//!
//! [`CurlConfig`] groups the gesture switches, interaction regions, and
//! settle timing. Regions are stored as fractions of the surface (`0.0..=1.0`)
//! and resolved against the current size whenever they are read, so a
//! rotation never leaves them stale.
//!
//! # Loading
//!
//! ```toml
//! # pagecurl.toml
//! tap_backward_enabled = false
//! commit_threshold = 0.35
//! easing = "ease_in_out"
//!
//! [drag_forward_interaction]
//! start = { x = 0.6, y = 0.0, width = 0.4, height = 1.0 }
//! end = { x = 0.0, y = 0.0, width = 0.5, height = 1.0 }
//! ```
//!
//! ```rust,ignore
//! let config = CurlConfig::from_toml_file("pagecurl.toml")?;
//! let config = CurlConfig::from_json_str(json)?;
//! ```
//!
//! # Runtime swaps
//!
//! [`ConfigStore`] shares one configuration between the host and the curl
//! state. Reads are wait-free (`arc-swap`); the state re-reads on every
//! event and frame, so a swap takes effect on the next one.

#[cfg(feature = "config-file")]
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::edge_state::{CurlMotion, Direction};
use crate::geometry::{InteractionZone, Rect, Size};

const LEFT_HALF: Rect = Rect::new(0.0, 0.0, 0.5, 1.0);
const RIGHT_HALF: Rect = Rect::new(0.5, 0.0, 0.5, 1.0);

// ---------------------------------------------------------------------------
// Interaction regions
// ---------------------------------------------------------------------------

/// Drag regions for one direction, in surface fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragInteraction {
    /// Where the drag must begin.
    pub start: Rect,
    /// The region the edge must travel toward for the turn to commit.
    pub end: Rect,
}

impl DragInteraction {
    /// Default regions for `direction`: start on the near half, end on the
    /// far half.
    pub const fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Self {
                start: RIGHT_HALF,
                end: LEFT_HALF,
            },
            Direction::Backward => Self {
                start: LEFT_HALF,
                end: RIGHT_HALF,
            },
        }
    }

    /// Resolve to surface units.
    #[must_use]
    pub fn resolve(&self, size: Size) -> InteractionZone {
        InteractionZone::new(self.start.scaled(size), self.end.scaled(size))
    }
}

/// Tap regions, in surface fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapInteraction {
    pub forward: Rect,
    pub backward: Rect,
}

impl Default for TapInteraction {
    fn default() -> Self {
        Self {
            forward: RIGHT_HALF,
            backward: LEFT_HALF,
        }
    }
}

// ---------------------------------------------------------------------------
// CurlConfig
// ---------------------------------------------------------------------------

/// Everything tunable about a curl surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlConfig {
    pub drag_forward_enabled: bool,
    pub drag_backward_enabled: bool,
    pub tap_forward_enabled: bool,
    pub tap_backward_enabled: bool,
    pub drag_forward_interaction: DragInteraction,
    pub drag_backward_interaction: DragInteraction,
    pub tap_interaction: TapInteraction,
    /// Fraction of the zone span a released drag must cover to commit.
    pub commit_threshold: f32,
    /// Length of a settle animation in milliseconds.
    pub animation_duration_ms: u64,
    pub easing: Easing,
}

impl Default for CurlConfig {
    fn default() -> Self {
        Self {
            drag_forward_enabled: true,
            drag_backward_enabled: true,
            tap_forward_enabled: true,
            tap_backward_enabled: true,
            drag_forward_interaction: DragInteraction::for_direction(Direction::Forward),
            drag_backward_interaction: DragInteraction::for_direction(Direction::Backward),
            tap_interaction: TapInteraction::default(),
            commit_threshold: 0.5,
            animation_duration_ms: 250,
            easing: Easing::default(),
        }
    }
}

impl CurlConfig {
    /// Whether dragging in `direction` is switched on.
    pub fn drag_enabled(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.drag_forward_enabled,
            Direction::Backward => self.drag_backward_enabled,
        }
    }

    /// Whether tapping toward `direction` is switched on.
    pub fn tap_enabled(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.tap_forward_enabled,
            Direction::Backward => self.tap_backward_enabled,
        }
    }

    /// Drag regions for `direction`, in surface fractions.
    pub fn drag_interaction(&self, direction: Direction) -> &DragInteraction {
        match direction {
            Direction::Forward => &self.drag_forward_interaction,
            Direction::Backward => &self.drag_backward_interaction,
        }
    }

    /// Drag zone for `direction` in surface units.
    pub fn zone(&self, direction: Direction, size: Size) -> InteractionZone {
        self.drag_interaction(direction).resolve(size)
    }

    /// Tap region for `direction`, in surface fractions.
    pub fn tap_region(&self, direction: Direction) -> Rect {
        match direction {
            Direction::Forward => self.tap_interaction.forward,
            Direction::Backward => self.tap_interaction.backward,
        }
    }

    /// Settle parameters derived from this configuration.
    #[must_use]
    pub fn motion(&self) -> CurlMotion {
        CurlMotion {
            commit_threshold: self.commit_threshold,
            duration: Duration::from_millis(self.animation_duration_ms),
            easing: self.easing.function(),
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(0.0..=1.0).contains(&self.commit_threshold) {
            errors.push(format!(
                "commit_threshold must be in [0, 1], got {}",
                self.commit_threshold
            ));
        }

        for direction in Direction::ALL {
            let interaction = self.drag_interaction(direction);
            let name = format!("drag_{direction}_interaction");
            check_region(&mut errors, &format!("{name}.start"), interaction.start);
            check_region(&mut errors, &format!("{name}.end"), interaction.end);
            let tap = format!("tap_interaction.{direction}");
            check_region(&mut errors, &tap, self.tap_region(direction));
        }

        errors
    }

    /// Parse from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate, turning any problems into an error.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Validation`] listing every problem found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn check_region(errors: &mut Vec<String>, name: &str, rect: Rect) {
    let finite = [rect.x, rect.y, rect.width, rect.height]
        .iter()
        .all(|v| v.is_finite());
    if !finite || rect.width < 0.0 || rect.height < 0.0 {
        errors.push(format!("{name} must have finite, non-negative extent, got {rect:?}"));
        return;
    }
    if rect.left() < 0.0 || rect.top() < 0.0 || rect.right() > 1.0 || rect.bottom() > 1.0 {
        errors.push(format!("{name} must lie within the unit square, got {rect:?}"));
    }
}

// ---------------------------------------------------------------------------
// Shared store
// ---------------------------------------------------------------------------

/// Shared, swappable configuration.
///
/// Cloning a `ConfigStore` creates another handle to the **same**
/// configuration; a [`store`](ConfigStore::store) through any handle is seen
/// by all of them.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    inner: Arc<ArcSwap<CurlConfig>>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(CurlConfig::default())
    }
}

impl ConfigStore {
    /// Create a store with an initial configuration.
    pub fn new(config: CurlConfig) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// Read without cloning. Returns a guard that derefs to the config.
    #[inline]
    pub fn load(&self) -> arc_swap::Guard<Arc<CurlConfig>> {
        self.inner.load()
    }

    /// Atomically replace the configuration.
    pub fn store(&self, config: CurlConfig) {
        self.inner.store(Arc::new(config));
    }

    /// Replace the configuration with an edited copy of the current one.
    pub fn update(&self, edit: impl Fn(&mut CurlConfig)) {
        self.inner.rcu(|current| {
            let mut next = CurlConfig::clone(current);
            edit(&mut next);
            next
        });
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-file")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config-file")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
