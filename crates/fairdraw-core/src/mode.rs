//! Generation modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RngError;

/// Code of the retired weak mode. Recognised so it can be rejected by name.
const RETIRED_MCRYPT_CODE: i64 = 4;

/// Backend selected for integer generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Seedable general-purpose PRNG of the platform (`StdRng`).
    PlatformDefault,
    /// Seedable 64-bit Mersenne Twister.
    MersenneTwister,
    /// Operating system entropy with unbiased range sampling.
    #[default]
    CryptoStrong,
}

impl Mode {
    /// All valid modes.
    pub const ALL: [Mode; 3] = [
        Mode::PlatformDefault,
        Mode::MersenneTwister,
        Mode::CryptoStrong,
    ];

    /// Stable numeric code of the mode.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Mode::PlatformDefault => 1,
            Mode::MersenneTwister => 2,
            Mode::CryptoStrong => 8,
        }
    }

    /// Whether `set_seed` reseeds a PRNG in this mode.
    #[must_use]
    pub const fn is_seedable(self) -> bool {
        !matches!(self, Mode::CryptoStrong)
    }

    /// Short name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Mode::PlatformDefault => "platform",
            Mode::MersenneTwister => "mersenne-twister",
            Mode::CryptoStrong => "crypto",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i64> for Mode {
    type Error = RngError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Mode::PlatformDefault),
            2 => Ok(Mode::MersenneTwister),
            8 => Ok(Mode::CryptoStrong),
            RETIRED_MCRYPT_CODE => Err(RngError::InvalidMode(format!(
                "{code} (mcrypt is retired)"
            ))),
            other => Err(RngError::InvalidMode(other.to_string())),
        }
    }
}

impl FromStr for Mode {
    type Err = RngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "platform" | "platform_default" | "platform-default" | "default" => {
                Ok(Mode::PlatformDefault)
            }
            "mt" | "mersenne_twister" | "mersenne-twister" => Ok(Mode::MersenneTwister),
            "crypto" | "crypto_strong" | "crypto-strong" | "os" => Ok(Mode::CryptoStrong),
            "mcrypt" => Err(RngError::InvalidMode("mcrypt (retired)".to_owned())),
            _ => match name.parse::<i64>() {
                Ok(code) => Mode::try_from(code),
                Err(_) => Err(RngError::InvalidMode(s.to_owned())),
            },
        }
    }
}
