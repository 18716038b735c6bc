use std::error;
use std::fmt;

/// Errors raised while validating a run configuration.
///
/// Every variant is fatal: validation happens before the first generation is
/// simulated, so a run either starts with a valid configuration or not at all.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Population size must be at least 1.
    InvalidPopulationSize(usize),

    /// Innovation rate must lie in [0, 1].
    InvalidInnovationRate(f64),

    /// The statistics window `warm_up + 1 ..= timesteps` is empty.
    EmptyWindow { timesteps: usize, warm_up: usize },

    /// A per-generation bias schedule does not cover every generation.
    ScheduleLength { expected: usize, found: usize },

    /// The spread of a heterogeneous bias must be finite and non-negative.
    InvalidBiasSpread(f64),

    /// A bias value (scalar, schedule entry or mean) is NaN or infinite.
    NonFiniteBias(f64),

    /// The number of top-ranked variants for turnover estimation must be positive.
    InvalidTop(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPopulationSize(n) => {
                write!(f, "Invalid population size: {n} (must be at least 1)")
            }
            Self::InvalidInnovationRate(mu) => {
                write!(
                    f,
                    "Invalid innovation rate: {mu} (must be between 0.0 and 1.0)"
                )
            }
            Self::EmptyWindow { timesteps, warm_up } => {
                write!(
                    f,
                    "Empty statistics window: timesteps ({timesteps}) must exceed warm-up ({warm_up})"
                )
            }
            Self::ScheduleLength { expected, found } => {
                write!(
                    f,
                    "Bias schedule length mismatch: expected {expected} generations, found {found}"
                )
            }
            Self::InvalidBiasSpread(sd) => {
                write!(
                    f,
                    "Invalid bias standard deviation: {sd} (must be finite and non-negative)"
                )
            }
            Self::NonFiniteBias(b) => write!(f, "Bias must be a finite number, got {b}"),
            Self::InvalidTop(top) => {
                write!(f, "Invalid number of top variants: {top} (must be at least 1)")
            }
        }
    }
}

impl error::Error for ConfigError {}

/// Errors that can occur during simulation building.
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderError {
    /// A required parameter is missing
    MissingRequired(&'static str),
    /// The assembled configuration failed validation
    Config(ConfigError),
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired(param) => {
                write!(f, "Missing required parameter: {param}")
            }
            Self::Config(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl error::Error for BuilderError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::MissingRequired(_) => None,
        }
    }
}

impl From<ConfigError> for BuilderError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let e = ConfigError::InvalidInnovationRate(1.5);
        assert_eq!(
            e.to_string(),
            "Invalid innovation rate: 1.5 (must be between 0.0 and 1.0)"
        );

        let e = ConfigError::EmptyWindow {
            timesteps: 10,
            warm_up: 10,
        };
        assert!(e.to_string().contains("timesteps (10) must exceed warm-up (10)"));
    }

    #[test]
    fn test_builder_error_wraps_config_error() {
        let e: BuilderError = ConfigError::InvalidPopulationSize(0).into();
        assert!(matches!(e, BuilderError::Config(_)));
        assert!(error::Error::source(&e).is_some());
    }
}
