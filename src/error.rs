//! Error types for lorentz_coulomb.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Two charged particles occupy the same position, so the Coulomb
    /// direction is undefined.
    #[error("degenerate separation: charged particles are coincident")]
    DegenerateSeparation,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid particle: {0}")]
    InvalidParticle(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
