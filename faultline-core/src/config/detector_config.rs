//! Detector selection configuration.

use serde::{Deserialize, Serialize};

use crate::errors::SelectionError;

/// The run's chosen mode for deriving the active detector set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionSpec {
    /// Every factory whose default-enabled flag is set, in registration order.
    #[default]
    AllEnabled,
    /// Only the named detectors, in list order.
    Include(Vec<String>),
    /// Every registered detector except the named ones, in registration order.
    Exclude(Vec<String>),
}

impl SelectionSpec {
    /// Build a spec from optional inclusion and exclusion lists.
    /// Supplying both is a configuration error.
    pub fn from_lists(
        include: Option<Vec<String>>,
        exclude: Option<Vec<String>>,
    ) -> Result<Self, SelectionError> {
        match (include, exclude) {
            (Some(_), Some(_)) => Err(SelectionError::ConflictingModes),
            (Some(names), None) => Ok(Self::Include(names)),
            (None, Some(names)) => Ok(Self::Exclude(names)),
            (None, None) => Ok(Self::AllEnabled),
        }
    }

    /// The explicitly listed names, empty for `AllEnabled`.
    pub fn names(&self) -> &[String] {
        match self {
            Self::AllEnabled => &[],
            Self::Include(names) | Self::Exclude(names) => names,
        }
    }
}

/// Run-time detector selection. At most one of the two lists may be set.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectorConfig {
    /// Run only these detectors, in this order.
    pub visitors: Option<Vec<String>>,
    /// Run every registered detector except these.
    pub omit_visitors: Option<Vec<String>>,
}

impl DetectorConfig {
    /// Convert the configured lists into a selection spec.
    pub fn selection_spec(&self) -> Result<SelectionSpec, SelectionError> {
        SelectionSpec::from_lists(self.visitors.clone(), self.omit_visitors.clone())
    }

    /// Split a comma separated list (`a,b,,c`) into names, dropping empties.
    pub fn parse_list(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}
