//! Keyed physical property storage for a fluid phase.
//!
//! Transport algorithms look up pore-scale physics by string key, e.g.
//! `"throat.diffusive_conductance"` or `"pore.mole_fraction"`. Keys carry an
//! entity prefix naming which network element they index; the store validates
//! the prefix on write so a throat array can never be filed under a pore key.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors from phase property storage.
#[derive(Debug, Error)]
pub enum PhaseError {
    #[error("key '{key}' does not name a {expected} property")]
    WrongEntity { key: String, expected: Entity },

    #[error("key '{0}' has no entity prefix (expected 'pore.' or 'throat.')")]
    MissingPrefix(String),
}

/// The network element a property key indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    Pore,
    Throat,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Pore => write!(f, "pore"),
            Entity::Throat => write!(f, "throat"),
        }
    }
}

/// Split a property key into its entity prefix and property name.
pub fn split_key(key: &str) -> Result<(Entity, &str), PhaseError> {
    if let Some(name) = key.strip_prefix("pore.") {
        Ok((Entity::Pore, name))
    } else if let Some(name) = key.strip_prefix("throat.") {
        Ok((Entity::Throat, name))
    } else {
        Err(PhaseError::MissingPrefix(key.to_string()))
    }
}

/// A fluid phase: named, keyed per-pore and per-throat float arrays.
///
/// Physics collaborators (conductance models) write here; transport
/// algorithms only read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pore_props: HashMap<String, Vec<f64>>,
    throat_props: HashMap<String, Vec<f64>>,
}

impl Phase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Store a per-throat array. The key must carry the `throat.` prefix.
    pub fn set_throat_values(&mut self, key: &str, values: Vec<f64>) -> Result<(), PhaseError> {
        match split_key(key)? {
            (Entity::Throat, _) => {
                self.throat_props.insert(key.to_string(), values);
                Ok(())
            }
            _ => Err(PhaseError::WrongEntity {
                key: key.to_string(),
                expected: Entity::Throat,
            }),
        }
    }

    /// Store a per-pore array. The key must carry the `pore.` prefix.
    pub fn set_pore_values(&mut self, key: &str, values: Vec<f64>) -> Result<(), PhaseError> {
        match split_key(key)? {
            (Entity::Pore, _) => {
                self.pore_props.insert(key.to_string(), values);
                Ok(())
            }
            _ => Err(PhaseError::WrongEntity {
                key: key.to_string(),
                expected: Entity::Pore,
            }),
        }
    }

    pub fn throat_values(&self, key: &str) -> Option<&[f64]> {
        self.throat_props.get(key).map(Vec::as_slice)
    }

    pub fn pore_values(&self, key: &str) -> Option<&[f64]> {
        self.pore_props.get(key).map(Vec::as_slice)
    }

    pub fn throat_keys(&self) -> impl Iterator<Item = &str> {
        self.throat_props.keys().map(String::as_str)
    }

    pub fn pore_keys(&self) -> impl Iterator<Item = &str> {
        self.pore_props.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_key() {
        assert_eq!(
            split_key("throat.diffusive_conductance").unwrap(),
            (Entity::Throat, "diffusive_conductance")
        );
        assert_eq!(
            split_key("pore.mole_fraction").unwrap(),
            (Entity::Pore, "mole_fraction")
        );
        assert!(matches!(
            split_key("diffusive_conductance"),
            Err(PhaseError::MissingPrefix(_))
        ));
    }

    #[test]
    fn test_entity_prefix_enforced() {
        let mut phase = Phase::new("water");
        assert!(phase
            .set_throat_values("throat.hydraulic_conductance", vec![1.0, 2.0])
            .is_ok());
        assert!(matches!(
            phase.set_throat_values("pore.pressure", vec![1.0]),
            Err(PhaseError::WrongEntity { .. })
        ));
        assert!(matches!(
            phase.set_pore_values("throat.hydraulic_conductance", vec![1.0]),
            Err(PhaseError::WrongEntity { .. })
        ));
    }

    #[test]
    fn test_lookup_roundtrip() {
        let mut phase = Phase::new("air");
        phase
            .set_pore_values("pore.concentration", vec![0.5, 0.25])
            .unwrap();
        assert_eq!(
            phase.pore_values("pore.concentration"),
            Some(&[0.5, 0.25][..])
        );
        assert!(phase.pore_values("pore.missing").is_none());
        assert!(phase.throat_values("throat.missing").is_none());
    }
}
