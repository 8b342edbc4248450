//! Server-sourced user profile and subscription state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subscription status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    None,
    Trialing,
    Active,
    PastDue,
    Canceled,
}

impl SubscriptionStatus {
    /// Does this status grant access to subscriber features?
    ///
    /// Trial users count as subscribed until the trial lapses server-side.
    pub fn is_subscribed(&self) -> bool {
        matches!(self, SubscriptionStatus::Trialing | SubscriptionStatus::Active)
    }
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        SubscriptionStatus::None
    }
}

/// The authenticated user's profile as returned by `GET /auth/me`.
///
/// Timestamps stay RFC 3339 strings - the session layer displays them at
/// most, it never computes on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub auth_provider: String,
    #[serde(default)]
    pub subscription_status: SubscriptionStatus,
    pub trial_ends_at: Option<String>,
    pub telegram_chat_id: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    pub gdpr_consent_at: Option<String>,
    pub created_at: String,
}
