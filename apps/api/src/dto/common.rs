use serde::{Deserialize, Serialize};
use stockroom_domain::{AccessDecision, PermissionName};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Query string for access checks.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-check-query.ts"
)]
pub struct AccessCheckQuery {
    pub permission: String,
}

/// Outcome of an access check for the current user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-check-response.ts"
)]
pub struct AccessCheckResponse {
    pub permission: String,
    pub allowed: bool,
    pub reason: Option<String>,
}

impl AccessCheckResponse {
    pub fn new(permission: &PermissionName, decision: AccessDecision) -> Self {
        Self {
            permission: permission.as_str().to_owned(),
            allowed: decision.is_allowed(),
            reason: decision
                .deny_reason()
                .map(|reason| reason.as_str().to_owned()),
        }
    }
}
