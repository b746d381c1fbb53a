//! CLI-specific error types and exit code mapping

use bgpship_core::error::BgpshipError;
use bgpship_shipper::ShipperError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading, validation or a missing required argument.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required secret could not be fetched.
    #[error("secret error: {0}")]
    Secret(String),

    /// Moving, creating or appending the dump files failed.
    #[error("rotation error: {0}")]
    Rotation(String),

    /// The dump reader failed (corrupt or truncated dump, decoder failure).
    #[error("read error: {0}")]
    Read(String),

    /// The ingestion endpoint rejected the batch or could not be reached.
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                   |
    /// |------|-------------------------------------------|
    /// | 0    | Success (including nothing to ship)       |
    /// | 1    | General / command error                   |
    /// | 2    | Configuration, argument or secret error   |
    /// | 3    | Rotation error                            |
    /// | 4    | Dump read error                           |
    /// | 5    | Batch rejected or endpoint unreachable    |
    /// | 10   | IO error                                  |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Secret(_) => 2,
            Self::Rotation(_) => 3,
            Self::Read(_) => 4,
            Self::Delivery(_) => 5,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<BgpshipError> for CliError {
    fn from(e: BgpshipError) -> Self {
        match e {
            BgpshipError::Config(inner) => Self::Config(inner.to_string()),
            BgpshipError::Secret(inner) => Self::Secret(inner.to_string()),
            BgpshipError::Io(inner) => Self::Io(inner),
        }
    }
}

impl From<ShipperError> for CliError {
    fn from(e: ShipperError) -> Self {
        match e {
            ShipperError::Rotation { .. } => Self::Rotation(e.to_string()),
            ShipperError::Read { .. } => Self::Read(e.to_string()),
            ShipperError::Core(inner) => inner.into(),
            ShipperError::Serialize(inner) => Self::JsonSerialize(inner),
            ShipperError::Sign(_) | ShipperError::HttpClient(_) | ShipperError::Task(_) => {
                Self::Command(e.to_string())
            }
        }
    }
}
