//! Registry Fallback Resolver.
//!
//! Consulted only when the record lookup reports no zone at all. "No
//! records" is overloaded: the name may simply not serve content yet
//! (normal during a transfer or an auction) or may genuinely not exist.
//! This stage recovers that signal instead of collapsing everything into
//! one not-found response.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ResolveResult;
use crate::orchestrator::{Action, InfoKind};

/// A name's ownership lifecycle state, as classified by the secondary
/// registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryState {
    /// Mid-transfer between owners. A normal transient state, not a failure.
    Transfer,
    /// Open for bidding. The name is contested, not missing.
    Bid,
    /// Any other state, including a registry with no information at all.
    Other(String),
}

/// Secondary-registry collaborator: classifies a name's lifecycle state.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Classify a name. `Err` means the registry could not answer
    /// (transport failure, protocol error, unknown name).
    async fn get_state(&self, name: &str) -> ResolveResult<RegistryState>;
}

/// Map one registry consultation to its terminal action.
///
/// Transfer and bid states get informational pages; everything else —
/// including registry errors and names the registry has never heard of —
/// defers to the human-facing explorer rather than surfacing a raw failure.
/// Errors route the same way as `Other` but are logged distinctly.
pub fn fallback_action(query: &str, state: ResolveResult<RegistryState>) -> Action {
    match state {
        Ok(RegistryState::Transfer) => {
            info!(space = %query, "space is mid-transfer, rendering info page");
            Action::InfoPage {
                kind: InfoKind::Transfer,
                subject: query.to_string(),
            }
        }
        Ok(RegistryState::Bid) => {
            info!(space = %query, "space is up for bidding, rendering info page");
            Action::InfoPage {
                kind: InfoKind::Bid,
                subject: query.to_string(),
            }
        }
        Ok(RegistryState::Other(state)) => {
            info!(space = %query, state = %state, "no actionable registry state, deferring to explorer");
            Action::ExplorerRedirect(query.to_string())
        }
        Err(err) => {
            warn!(space = %query, error = %err, "registry lookup failed, deferring to explorer");
            Action::ExplorerRedirect(query.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;

    #[test]
    fn transfer_state_maps_to_info_page() {
        let action = fallback_action("@example", Ok(RegistryState::Transfer));
        assert_eq!(
            action,
            Action::InfoPage {
                kind: InfoKind::Transfer,
                subject: "@example".to_string(),
            }
        );
    }

    #[test]
    fn bid_state_maps_to_info_page() {
        let action = fallback_action("@example", Ok(RegistryState::Bid));
        assert_eq!(
            action,
            Action::InfoPage {
                kind: InfoKind::Bid,
                subject: "@example".to_string(),
            }
        );
    }

    #[test]
    fn other_state_defers_to_explorer() {
        let action = fallback_action("@foo", Ok(RegistryState::Other("revoked".to_string())));
        assert_eq!(action, Action::ExplorerRedirect("@foo".to_string()));
    }

    #[test]
    fn registry_error_routes_like_other() {
        let action = fallback_action(
            "@foo",
            Err(ResolveError::BackendUnavailable("connection refused".to_string())),
        );
        assert_eq!(action, Action::ExplorerRedirect("@foo".to_string()));
    }
}
