//! Which decomposition components to export.
use serde::{Deserialize, Serialize};

use crate::decomposition::errors::{DecompositionError, DecompositionResult};

/// Component selection for exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentSelection {
    /// Every component.
    #[default]
    All,
    /// The first `n` components.
    Range(usize),
    /// Explicit component indices, exported in the given order.
    List(Vec<usize>),
}

impl ComponentSelection {
    /// Concrete component indices for a decomposition with `n_components`.
    ///
    /// Errors
    /// ------
    /// - `DecompositionError::EmptySelection` when nothing would be
    ///   exported.
    /// - `DecompositionError::ComponentOutOfRange` for indices (or a range
    ///   end) beyond `n_components`.
    pub fn resolve(&self, n_components: usize) -> DecompositionResult<Vec<usize>> {
        let components: Vec<usize> = match self {
            ComponentSelection::All => (0..n_components).collect(),
            ComponentSelection::Range(n) => {
                if *n > n_components {
                    return Err(DecompositionError::ComponentOutOfRange {
                        component: n - 1,
                        n_components,
                    });
                }
                (0..*n).collect()
            }
            ComponentSelection::List(ids) => {
                if let Some(&component) = ids.iter().find(|&&id| id >= n_components) {
                    return Err(DecompositionError::ComponentOutOfRange { component, n_components });
                }
                ids.clone()
            }
        };
        if components.is_empty() {
            return Err(DecompositionError::EmptySelection);
        }
        Ok(components)
    }
}
