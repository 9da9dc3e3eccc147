//! Cache parameterization.
//!
//! This module defines the construction parameters for the cache model. It
//! provides:
//! 1. **Defaults:** Baseline geometry and port counts.
//! 2. **Structures:** The flat [`CacheParams`] record with serde defaults.
//! 3. **Enums:** The replacement policy selector.
//!
//! Parameters arrive either from JSON scenarios (see [`crate::sim`]) or from
//! `CacheParams::default()` for direct construction.

use serde::Deserialize;

use crate::common::{AddrLayout, ConfigError};

/// Default parameter constants used when a field is not explicitly set.
mod defaults {
    /// Default request address width in bits.
    pub const ADDR_WIDTH: u32 = 32;

    /// Default payload width in bits.
    pub const DATA_WIDTH: u32 = 32;

    /// Default number of lines (direct-mapped index range).
    pub const LINES: usize = 64;

    /// Default associativity (ways per line).
    pub const WAYS: usize = 4;

    /// Default number of fill ports.
    pub const FILL_PORTS: usize = 1;

    /// Default number of read ports.
    pub const READ_PORTS: usize = 1;
}

/// Replacement policy algorithms.
///
/// Selects how the per-line victim way is chosen when an allocating fill
/// misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PolicyKind {
    /// Tree-based Pseudo-LRU.
    ///
    /// Maintains `ways - 1` tree bits per line and approximates true LRU
    /// ordering with one bit per internal tree node.
    #[default]
    #[serde(alias = "PLRU", alias = "Plru")]
    PseudoLru,

    /// Available-Invalidated.
    ///
    /// Tracks which ways are currently invalid and greedily assigns the
    /// lowest-indexed available way, falling back to way 0 (with a forced
    /// eviction) when every way is allocated.
    #[serde(alias = "Available")]
    AvailableInvalidated,
}

/// Construction parameters for one cache instance.
///
/// # Examples
///
/// Creating the default record:
///
/// ```
/// use cache_core::config::CacheParams;
///
/// let params = CacheParams::default();
/// assert!(params.validate().is_ok());
/// assert_eq!(params.ways, 4);
/// assert_eq!(params.lines, 64);
/// ```
///
/// Deserializing from JSON (typical scenario usage):
///
/// ```
/// use cache_core::config::{CacheParams, PolicyKind};
///
/// let json = r#"{
///     "ways": 8,
///     "lines": 1,
///     "policy": "Available",
///     "read_with_invalidate": true
/// }"#;
///
/// let params: CacheParams = serde_json::from_str(json).unwrap();
/// assert_eq!(params.ways, 8);
/// assert_eq!(params.policy, PolicyKind::AvailableInvalidated);
/// assert_eq!(params.addr_width, 32);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CacheParams {
    /// Request address width in bits (1..=64)
    #[serde(default = "CacheParams::default_addr_width")]
    pub addr_width: u32,

    /// Payload width in bits (1..=64)
    #[serde(default = "CacheParams::default_data_width")]
    pub data_width: u32,

    /// Number of lines; must be a power of two
    #[serde(default = "CacheParams::default_lines")]
    pub lines: usize,

    /// Associativity; must be a power of two, at most 64
    #[serde(default = "CacheParams::default_ways")]
    pub ways: usize,

    /// Replacement policy
    #[serde(default)]
    pub policy: PolicyKind,

    /// Number of fill ports
    #[serde(default = "CacheParams::default_fill_ports")]
    pub fill_ports: usize,

    /// Number of read ports
    #[serde(default = "CacheParams::default_read_ports")]
    pub read_ports: usize,

    /// Drive the eviction output paired with each fill port
    #[serde(default = "CacheParams::default_evictions")]
    pub evictions: bool,

    /// Allow read ports to issue read-with-invalidate
    #[serde(default)]
    pub read_with_invalidate: bool,
}

impl CacheParams {
    /// Returns the default address width.
    fn default_addr_width() -> u32 {
        defaults::ADDR_WIDTH
    }

    /// Returns the default payload width.
    fn default_data_width() -> u32 {
        defaults::DATA_WIDTH
    }

    /// Returns the default line count.
    fn default_lines() -> usize {
        defaults::LINES
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::WAYS
    }

    /// Returns the default fill port count.
    fn default_fill_ports() -> usize {
        defaults::FILL_PORTS
    }

    /// Returns the default read port count.
    fn default_read_ports() -> usize {
        defaults::READ_PORTS
    }

    /// Eviction outputs are wired by default.
    fn default_evictions() -> bool {
        true
    }

    /// Number of bits selecting the line.
    pub fn line_bits(&self) -> u32 {
        self.lines.trailing_zeros()
    }

    /// Builds the address layout implied by these parameters.
    ///
    /// Call [`CacheParams::validate`] first; the layout assumes consistent
    /// geometry.
    pub fn layout(&self) -> AddrLayout {
        AddrLayout::new(self.addr_width, self.lines)
    }

    /// Fail-fast validation of the whole parameter record.
    ///
    /// Checks every construction-time invalidity class: zero or
    /// non-power-of-two geometry, way counts wider than the model's 64-bit
    /// vectors, and address widths that leave no tag bits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if self.lines == 0 {
            return Err(ConfigError::ZeroLines);
        }
        if !self.ways.is_power_of_two() {
            return Err(ConfigError::WaysNotPowerOfTwo(self.ways));
        }
        if self.ways > 64 {
            return Err(ConfigError::TooManyWays(self.ways));
        }
        if !self.lines.is_power_of_two() {
            return Err(ConfigError::LinesNotPowerOfTwo(self.lines));
        }
        if self.addr_width == 0 || self.addr_width > 64 {
            return Err(ConfigError::AddrWidthInvalid(self.addr_width));
        }
        if self.data_width == 0 || self.data_width > 64 {
            return Err(ConfigError::DataWidthInvalid(self.data_width));
        }
        let line_bits = self.line_bits();
        if self.addr_width <= line_bits {
            return Err(ConfigError::AddrWidthTooSmall {
                addr_width: self.addr_width,
                line_bits,
            });
        }
        Ok(())
    }
}

impl Default for CacheParams {
    /// Creates the baseline parameter record: a 4-way, 64-line cache with
    /// 32-bit addresses and data, one fill port, one read port, Pseudo-LRU
    /// replacement, eviction outputs wired, read-with-invalidate off.
    fn default() -> Self {
        Self {
            addr_width: defaults::ADDR_WIDTH,
            data_width: defaults::DATA_WIDTH,
            lines: defaults::LINES,
            ways: defaults::WAYS,
            policy: PolicyKind::default(),
            fill_ports: defaults::FILL_PORTS,
            read_ports: defaults::READ_PORTS,
            evictions: true,
            read_with_invalidate: false,
        }
    }
}
