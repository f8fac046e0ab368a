use std::fmt;

/// Identity and role data of an account whose password has been verified.
///
/// Services convert their own user entity into this projection before
/// asking for authorization or a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub email: String,
    pub is_staff: bool,
    pub is_subscription_staff: bool,
    pub subscription_id: Option<String>,
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    Denied(DenialReason),
}

/// Why an account was refused a token. Internal only; callers see one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    NotStaff,
    NoSubscription,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::NotStaff => write!(f, "account is neither staff nor subscription staff"),
            DenialReason::NoSubscription => write!(f, "account has no subscription"),
        }
    }
}

/// Role and subscription rule applied between password verification and
/// token issuance.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGate;

impl AccessGate {
    pub fn new() -> Self {
        Self
    }

    /// Allow staff or subscription staff that belong to a subscription.
    ///
    /// Only the presence of a subscription id is checked, not whether that
    /// subscription is active.
    pub fn authorize(&self, principal: &Principal) -> AccessDecision {
        if !(principal.is_staff || principal.is_subscription_staff) {
            return AccessDecision::Denied(DenialReason::NotStaff);
        }
        if principal.subscription_id.is_none() {
            return AccessDecision::Denied(DenialReason::NoSubscription);
        }
        AccessDecision::Allowed
    }
}
