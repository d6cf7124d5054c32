use crate::error::StackctlError;
use std::fmt;
use std::str::FromStr;

/// Operator intent, parsed once from the command token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Restart,
    Update,
}

/// A single orchestrator invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Bring services up in the background
    Up,
    /// Stop and remove services
    Down,
    /// Fetch latest images
    Pull,
}

impl Action {
    /// All actions, in the order the usage message lists them
    pub const ALL: &'static [Self] = &[Self::Start, Self::Stop, Self::Restart, Self::Update];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Update => "update",
        }
    }

    /// Alternate tokens accepted for this action
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Start => &["run"],
            _ => &[],
        }
    }

    /// Ordered orchestrator calls for this action
    pub fn steps(&self) -> &'static [Step] {
        match self {
            Self::Start => &[Step::Up],
            Self::Stop => &[Step::Down],
            Self::Restart => &[Step::Down, Step::Up],
            Self::Update => &[Step::Down, Step::Pull, Step::Up],
        }
    }

    /// Usage line listing every recognized token
    pub fn usage(program: &str) -> String {
        let tokens = Self::ALL
            .iter()
            .flat_map(|a| std::iter::once(a.name()).chain(a.aliases().iter().copied()))
            .collect::<Vec<_>>()
            .join("|");
        format!("Usage: {} {{{}}}", program, tokens)
    }
}

impl FromStr for Action {
    type Err = StackctlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|a| a.name() == s || a.aliases().contains(&s))
            .copied()
            .ok_or_else(|| StackctlError::UnknownCommand(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Step {
    /// Orchestrator arguments for this step
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            Self::Up => &["up", "-d"],
            Self::Down => &["down"],
            Self::Pull => &["pull"],
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args().join(" "))
    }
}
