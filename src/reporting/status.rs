//! Review lifecycle of a stored settlement.

use serde::{Deserialize, Serialize};

/// Where a settlement stands in the driver's review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    #[default]
    Pending,
    Accepted,
    RevisionRequested,
}

/// Something a driver or administrator does to a settlement under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    /// Driver signs off on the computed amount.
    Accept,
    /// Driver disputes the computed amount.
    Contest,
    /// Administrator corrected the figures and sends them back for review.
    Resubmit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("settlement is already accepted")]
    AlreadyAccepted,

    #[error("cannot {action:?} a settlement that is {status:?}")]
    InvalidTransition {
        status: SettlementStatus,
        action: ReviewAction,
    },
}

impl SettlementStatus {
    pub fn apply(self, action: ReviewAction) -> Result<SettlementStatus, ReviewError> {
        use ReviewAction::*;
        use SettlementStatus::*;

        match (self, action) {
            (Accepted, _) => Err(ReviewError::AlreadyAccepted),
            (Pending, Accept) => Ok(Accepted),
            (Pending, Contest) => Ok(RevisionRequested),
            (RevisionRequested, Resubmit) => Ok(Pending),
            (status, action) => Err(ReviewError::InvalidTransition { status, action }),
        }
    }

    pub fn is_accepted(&self) -> bool {
        *self == SettlementStatus::Accepted
    }
}
