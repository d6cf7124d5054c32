use crate::common::config::ComposeConfig;
use crate::common::paths::anchor;
use crate::dispatch::action::Step;
use crate::error::{Result, StackctlError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error};

/// Outcome of one orchestrator call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Success,
    /// `code` is `None` when the child was terminated by a signal
    Failed { code: Option<i32> },
}

impl StepStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<std::process::ExitStatus> for StepStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        if status.success() {
            Self::Success
        } else {
            Self::Failed {
                code: status.code(),
            }
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Run one step to completion
    async fn run(&self, step: Step) -> Result<StepStatus>;

    /// Shell-like rendering of the call `run` would make
    fn describe(&self, step: Step) -> String;
}

/// Runs `docker compose` (or a configured equivalent) against the compose
/// file colocated with the base directory
#[derive(Debug, Clone)]
pub struct ComposeOrchestrator {
    program: String,
    base_args: Vec<String>,
    base_dir: PathBuf,
}

impl ComposeOrchestrator {
    pub fn new(config: &ComposeConfig, base_dir: &Path) -> Self {
        let mut base_args = config.args.clone();

        let compose_file = anchor(base_dir, &config.file);
        base_args.push("-f".to_string());
        base_args.push(compose_file.to_string_lossy().into_owned());

        if let Some(env_file) = &config.env_file {
            let env_file = anchor(base_dir, env_file);
            if env_file.is_file() {
                base_args.push("--env-file".to_string());
                base_args.push(env_file.to_string_lossy().into_owned());
            } else {
                debug!("Env file {:?} not found, not passing --env-file", env_file);
            }
        }

        Self {
            program: config.program.clone(),
            base_args,
            base_dir: base_dir.to_path_buf(),
        }
    }

    /// Full argument vector for `step`, excluding the program
    pub fn args_for(&self, step: Step) -> Vec<String> {
        self.base_args
            .iter()
            .cloned()
            .chain(step.args().iter().map(|a| a.to_string()))
            .collect()
    }
}

#[async_trait]
impl Orchestrator for ComposeOrchestrator {
    async fn run(&self, step: Step) -> Result<StepStatus> {
        let args = self.args_for(step);
        debug!("Executing {} {:?} in {:?}", self.program, args, self.base_dir);

        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.base_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                error!("Failed to spawn '{}': {}", self.program, e);
                StackctlError::Spawn {
                    program: self.program.clone(),
                    source: e,
                }
            })?;

        Ok(status.into())
    }

    fn describe(&self, step: Step) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args_for(step))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
