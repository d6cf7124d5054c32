use crate::common::exit_code::codes;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackctlError {
    #[error("No command given")]
    MissingCommand,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Cannot resolve base directory {path:?}: {reason}")]
    BaseDir { path: PathBuf, reason: String },

    #[error("Configuration error in {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("Failed to launch orchestrator '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl StackctlError {
    /// Whether the usage message should accompany this error
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::MissingCommand | Self::UnknownCommand(_))
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingCommand | Self::UnknownCommand(_) => codes::USAGE,
            Self::BaseDir { .. } | Self::Config { .. } => codes::GENERAL_ERROR,
            Self::Spawn { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => codes::COMMAND_NOT_FOUND,
                std::io::ErrorKind::PermissionDenied => codes::CANNOT_EXECUTE,
                _ => codes::GENERAL_ERROR,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, StackctlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(StackctlError::MissingCommand.exit_code(), 1);
        assert_eq!(StackctlError::UnknownCommand("foo".into()).exit_code(), 1);

        let not_found = StackctlError::Spawn {
            program: "docker".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(not_found.exit_code(), 127);
        assert!(!not_found.is_usage());

        let base_dir = StackctlError::BaseDir {
            path: PathBuf::from("/nope"),
            reason: "does not exist".into(),
        };
        assert_eq!(base_dir.exit_code(), 1);
        assert!(!base_dir.is_usage());
    }
}
