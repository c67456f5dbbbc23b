use thiserror::Error;

/// User-visible failures raised while validating input for the seeding tool.
///
/// The assignment engine never produces these; they come from the layers that
/// translate user input into engine calls (shell, import, image upload).
#[derive(Debug, Error)]
pub enum SeedingError {
    /// Region name not among the four canonical regions.
    #[error("unknown region '{0}' (expected one of Grain, Tuber, Noodle, Dough)")]
    UnknownRegion(String),

    /// Seed number outside 1..=16.
    #[error("seed #{0} is out of range (1-16)")]
    SeedOutOfRange(usize),

    /// No starch in the pool carries this id.
    #[error("no starch with id {0}")]
    UnknownStarch(String),

    /// Starch name was empty after trimming.
    #[error("starch name cannot be empty")]
    EmptyName,

    /// Tournament name was empty after trimming.
    #[error("tournament name cannot be empty")]
    EmptyTournamentName,

    /// Uploaded image exceeds the configured size limit.
    #[error("image must be under {limit_kb}KB (got {size} bytes)")]
    ImageTooLarge { size: u64, limit_kb: u64 },

    /// Uploaded image could not be read or is not an image.
    #[error("could not read image {path}: {reason}")]
    ImageUnreadable { path: String, reason: String },

    /// Import document parsed but did not describe a bracket.
    #[error("invalid file format: {0}")]
    InvalidImport(String),

    /// Import document was not JSON at all.
    #[error("failed to parse file: {0}")]
    UnparseableImport(String),
}
