//! Construction-time error definitions.
//!
//! The cache has no runtime error channel: every per-cycle operation
//! completes. What can go wrong is construction with inconsistent
//! parameters, and that fails fast through [`ConfigError`].

use std::fmt;

/// Parameter validation failure raised during cache construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `ways` was zero; a cache needs at least one way per line.
    ZeroWays,

    /// `lines` was zero; a cache needs at least one line.
    ZeroLines,

    /// `ways` was not a power of two.
    ///
    /// The tree Pseudo-LRU state is only total for power-of-two way counts,
    /// and the way field is sized as `ceil(log2(ways))` bits.
    WaysNotPowerOfTwo(usize),

    /// `ways` exceeded 64, the widest way vector the model carries.
    TooManyWays(usize),

    /// `lines` was not a power of two.
    ///
    /// Index decode takes the low `line_bits` bits of the address, so the
    /// line count must fill that field exactly.
    LinesNotPowerOfTwo(usize),

    /// `addr_width` leaves no tag bits above the line field.
    AddrWidthTooSmall {
        /// The configured address width.
        addr_width: u32,
        /// Bits consumed by the line index.
        line_bits: u32,
    },

    /// `addr_width` was zero or wider than the 64-bit model buses.
    AddrWidthInvalid(u32),

    /// `data_width` was zero or wider than the 64-bit model buses.
    DataWidthInvalid(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroWays => write!(f, "ways must be at least 1"),
            ConfigError::ZeroLines => write!(f, "lines must be at least 1"),
            ConfigError::WaysNotPowerOfTwo(ways) => {
                write!(f, "ways must be a power of two, got {}", ways)
            }
            ConfigError::TooManyWays(ways) => {
                write!(f, "ways must not exceed 64, got {}", ways)
            }
            ConfigError::LinesNotPowerOfTwo(lines) => {
                write!(f, "lines must be a power of two, got {}", lines)
            }
            ConfigError::AddrWidthTooSmall {
                addr_width,
                line_bits,
            } => write!(
                f,
                "addr_width {} leaves no tag bits above {} line bits",
                addr_width, line_bits
            ),
            ConfigError::AddrWidthInvalid(width) => {
                write!(f, "addr_width must be in 1..=64, got {}", width)
            }
            ConfigError::DataWidthInvalid(width) => {
                write!(f, "data_width must be in 1..=64, got {}", width)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
