//! Generator configuration from the environment or a JSON document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, RngError};
use crate::generator::Generator;
use crate::mode::Mode;

/// Environment variable holding the mode name or code.
pub const MODE_VAR: &str = "FAIRDRAW_MODE";
/// Environment variable holding the optional integer seed.
pub const SEED_VAR: &str = "FAIRDRAW_SEED";

/// Mode and seed a generator is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Backend mode.
    pub mode: Mode,
    /// Optional seed for the seedable modes.
    pub seed: Option<i64>,
}

impl GeneratorConfig {
    /// Reads `FAIRDRAW_MODE` and `FAIRDRAW_SEED` from the process environment.
    ///
    /// # Errors
    ///
    /// See [`GeneratorConfig::from_lookup`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// Unset or empty variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `RngError::InvalidMode` for an unknown mode and
    /// `RngError::InvalidSeedType` for a seed that is not an integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup(MODE_VAR).filter(|v| !v.is_empty()) {
            Some(raw) => raw.parse::<Mode>()?,
            None => Mode::default(),
        };
        let seed = match lookup(SEED_VAR).filter(|v| !v.is_empty()) {
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| RngError::InvalidSeedType(raw))?,
            ),
            None => None,
        };
        Ok(Self { mode, seed })
    }

    /// Parses a JSON document such as `{"mode": "mt", "seed": 42}`.
    ///
    /// `mode` may be a name or a numeric code; both keys are optional.
    ///
    /// # Errors
    ///
    /// Returns `RngError::Config` for malformed JSON or a non-object
    /// document, `RngError::InvalidMode` for an unknown mode, and
    /// `RngError::InvalidSeedType` for a seed that is not a JSON integer.
    pub fn from_json(document: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(document).map_err(|e| RngError::Config(e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(RngError::Config(
                "configuration must be a JSON object".to_owned(),
            ));
        };

        let mode = match fields.get("mode") {
            None | Some(Value::Null) => Mode::default(),
            Some(Value::String(name)) => name.parse::<Mode>()?,
            Some(Value::Number(code)) => match code.as_i64() {
                Some(code) => Mode::try_from(code)?,
                None => return Err(RngError::InvalidMode(code.to_string())),
            },
            Some(other) => return Err(RngError::InvalidMode(other.to_string())),
        };

        let seed = match fields.get("seed") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) if n.is_i64() => n.as_i64(),
            Some(other) => return Err(RngError::InvalidSeedType(other.to_string())),
        };

        Ok(Self { mode, seed })
    }

    /// Builds a generator over OS entropy from this configuration.
    #[must_use]
    pub fn build(&self) -> Generator {
        Generator::new(self.mode, self.seed)
    }
}
