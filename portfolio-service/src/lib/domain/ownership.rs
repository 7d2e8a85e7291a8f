use crate::domain::user::models::UserId;

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipDecision {
    Allowed,
    Denied,
}

impl OwnershipDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, OwnershipDecision::Allowed)
    }
}

/// Compare a resource's recorded owner against the requester's bound identity.
///
/// Pure comparison: `Allowed` iff the identities are equal. Callers must
/// confirm the resource exists first so that a missing resource reports
/// not-found rather than a permission denial.
pub fn authorize(identity: UserId, owner: UserId) -> OwnershipDecision {
    if owner == identity {
        OwnershipDecision::Allowed
    } else {
        OwnershipDecision::Denied
    }
}
