use crate::common::xdg;
use crate::error::{Result, StackctlError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the configuration file looked up next to the compose file
pub const LOCAL_CONFIG_FILE: &str = "stackctl.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Orchestrator invocation
    pub compose: ComposeConfig,
    /// Multi-step dispatch behavior
    pub dispatch: DispatchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Orchestrator executable (looked up on PATH when not absolute)
    pub program: String,
    /// Arguments placed before the compose flags, e.g. `["compose"]`
    pub args: Vec<String>,
    /// Compose file, relative to the base directory
    pub file: PathBuf,
    /// Secrets file, relative to the base directory. Passed only if it exists.
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// What to do when a step of `restart` or `update` fails
    pub on_failure: FailurePolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failed step
    #[default]
    Abort,
    /// Run every step; the last step decides the exit code
    Continue,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            program: "docker".to_string(),
            args: vec!["compose".to_string()],
            file: PathBuf::from("docker-compose.yml"),
            env_file: Some(PathBuf::from(".env")),
        }
    }
}

impl Config {
    /// Get the user-level config file path
    pub fn get_config_file_path() -> PathBuf {
        xdg::get_config_dir().join("config.toml")
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise `<base_dir>/stackctl.toml` is
    /// tried, then the user config file, then the built-in defaults.
    pub fn load(explicit: Option<&Path>, base_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidates = [base_dir.join(LOCAL_CONFIG_FILE), Self::get_config_file_path()];
        for path in candidates.iter() {
            if path.is_file() {
                return Self::from_file(path);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {:?}", path);
        let contents = std::fs::read_to_string(path).map_err(|e| StackctlError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&contents).map_err(|reason| StackctlError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn parse(contents: &str) -> std::result::Result<Self, String> {
        let config: Config = toml::from_str(contents).map_err(|e| e.to_string())?;
        if config.compose.program.trim().is_empty() {
            return Err("compose.program cannot be empty".to_string());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.compose.program, "docker");
        assert_eq!(config.compose.args, vec!["compose"]);
        assert_eq!(config.compose.file, PathBuf::from("docker-compose.yml"));
        assert_eq!(config.dispatch.on_failure, FailurePolicy::Abort);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse(
            r#"
            [dispatch]
            on_failure = "continue"
            "#,
        )
        .unwrap();
        assert_eq!(config.dispatch.on_failure, FailurePolicy::Continue);
        assert_eq!(config.compose, ComposeConfig::default());
    }

    #[test]
    fn test_legacy_docker_compose_binary() {
        let config = Config::parse(
            r#"
            [compose]
            program = "docker-compose"
            args = []
            file = "stack/compose.yaml"
            "#,
        )
        .unwrap();
        assert_eq!(config.compose.program, "docker-compose");
        assert!(config.compose.args.is_empty());
        assert_eq!(config.compose.file, PathBuf::from("stack/compose.yaml"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Config::parse("[dispatch]\non_failure = \"retry\"\n").is_err());
        assert!(Config::parse("[compose]\nprogram = \" \"\n").is_err());
    }

    #[test]
    #[serial]
    fn test_local_file_wins_over_user_file() {
        let base = tempfile::tempdir().unwrap();
        let xdg = tempfile::tempdir().unwrap();
        std::env::set_var("XDG_CONFIG_HOME", xdg.path());

        std::fs::create_dir_all(xdg.path().join("stackctl")).unwrap();
        std::fs::write(
            xdg.path().join("stackctl").join("config.toml"),
            "[compose]\nprogram = \"podman\"\n",
        )
        .unwrap();
        assert_eq!(Config::load(None, base.path()).unwrap().compose.program, "podman");

        std::fs::write(
            base.path().join(LOCAL_CONFIG_FILE),
            "[compose]\nprogram = \"nerdctl\"\n",
        )
        .unwrap();
        assert_eq!(Config::load(None, base.path()).unwrap().compose.program, "nerdctl");

        std::env::remove_var("XDG_CONFIG_HOME");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let base = tempfile::tempdir().unwrap();
        let missing = base.path().join("nope.toml");
        let err = Config::load(Some(&missing), base.path()).unwrap_err();
        assert!(matches!(err, StackctlError::Config { .. }));
    }
}
