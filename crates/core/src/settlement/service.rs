//! Role-checked entry point for settlements.

use super::engine::SettlementEngine;
use super::error::SettlementError;
use super::request::SettlementRequest;
use super::types::SettlementRun;
use crate::access::{Role, View};
use crate::records::Snapshot;

/// Settlement operations available to operators.
pub struct SettlementService;

impl SettlementService {
    /// Runs a settlement on behalf of a role.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` when the role may not view settlements, or any
    /// error from [`SettlementEngine::compute`].
    pub fn run(
        role: Role,
        engine: &SettlementEngine,
        snapshot: &Snapshot,
        request: &SettlementRequest,
    ) -> Result<SettlementRun, SettlementError> {
        if !role.can_view(View::Settlements) {
            return Err(SettlementError::Forbidden { role });
        }
        engine.compute(snapshot, request)
    }
}
