use crate::error::{Error, Result};
use crate::schema::Plan;

/// Number of schemas a Free account may own.
pub const DEFAULT_FREE_TIER_LIMIT: usize = 2;

/// Check whether an owner on `plan` who already owns `existing` schemas may
/// create one more.
pub fn check_quota(plan: Plan, existing: usize, free_tier_limit: usize) -> Result<()> {
    match plan {
        Plan::Pro => Ok(()),
        Plan::Free if existing >= free_tier_limit => Err(Error::QuotaExceeded {
            limit: free_tier_limit,
        }),
        Plan::Free => Ok(()),
    }
}
