use super::backend::{FaerSolver, GaussSolver, LinearSystemBackend};
use anyhow::anyhow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Selects which linear-system backend [`build_solver`](Self::build_solver)
/// hands out. Parse from user-facing strings with [`str::parse`]; `"default"`
/// is accepted as an alias for [`SolverKind::default`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SolverKind {
    Gauss,
    #[default]
    Faer,
}

impl SolverKind {
    pub fn build_solver(self) -> Arc<dyn LinearSystemBackend> {
        match self {
            SolverKind::Gauss => Arc::new(GaussSolver),
            SolverKind::Faer => Arc::new(FaerSolver),
        }
    }

    pub fn available() -> impl Iterator<Item = SolverKind> {
        [SolverKind::Gauss, SolverKind::Faer].into_iter()
    }
}

impl FromStr for SolverKind {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "gauss" => Ok(SolverKind::Gauss),
            "faer" => Ok(SolverKind::Faer),
            "default" => Ok(SolverKind::default()),
            other => Err(anyhow!(
                "unknown solver '{}'; supported values: gauss, faer",
                other
            )),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolverKind::Gauss => "gauss",
            SolverKind::Faer => "faer",
        })
    }
}
