use http::StatusCode;

use crate::introspection::types::IntrospectOutcome;

pub const INACTIVE_MSG: &str = "inactive";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny { status: StatusCode, message: String },
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Deny { status, .. } if *status == StatusCode::UNAUTHORIZED => "deny_unauthorized",
            Decision::Deny { .. } => "deny_error",
        }
    }
}

/// active + 200 allows, inactive + 200 is 401 "inactive", anything else is
/// denied with the introspection status and message unchanged.
pub fn decide(outcome: &IntrospectOutcome) -> Decision {
    match (outcome.active, outcome.status_code) {
        (true, 200) => Decision::Allow,
        (false, 200) => Decision::Deny {
            status: StatusCode::UNAUTHORIZED,
            message: INACTIVE_MSG.to_owned(),
        },
        (_, code) => Decision::Deny {
            status: StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: outcome.status.to_owned(),
        },
    }
}
