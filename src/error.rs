use thiserror::Error;

#[derive(Error, Debug)]
pub enum RclonewError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The external program could not be started at all (missing binary,
    /// permission denied). Never degraded into an empty result.
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}: {stderr}", .code.map(|c| format!("status {}", c)).unwrap_or_else(|| "a signal".to_string()))]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Mount error: {0}")]
    Mount(String),

    #[error("Transfer error: {0}")]
    Transfer(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl RclonewError {
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }
}

#[cfg(test)]
impl RclonewError {
    /// Whether this error comes from the process infrastructure rather than
    /// from the external tool's own verdict.
    pub fn is_spawn(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }
}

pub type Result<T> = std::result::Result<T, RclonewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_display_with_code() {
        let err = RclonewError::CommandFailed {
            program: "fusermount".to_string(),
            code: Some(1),
            stderr: "entry not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "fusermount exited with status 1: entry not found"
        );
    }

    #[test]
    fn test_command_failed_display_signaled() {
        let err = RclonewError::CommandFailed {
            program: "rclone".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("a signal"));
    }

    #[test]
    fn test_spawn_error_is_spawn() {
        let err = RclonewError::spawn(
            "rclone",
            std::io::Error::new(std::io::ErrorKind::NotFound, "rclone not found"),
        );
        assert!(err.is_spawn());
        assert_eq!(err.to_string(), "Failed to execute rclone: rclone not found");
    }
}
