use super::model::UserRole;

/// What the signed-in user may do, resolved once when the session is set.
///
/// Views receive this instead of comparing role strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub can_upload_scans: bool,
    pub can_request_consultation: bool,
    pub can_act_on_consultations: bool,
    pub can_review_scans: bool,
    pub can_view_all_consultations: bool,
}

impl Capabilities {
    /// No capabilities at all (signed out).
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_role(role: UserRole) -> Self {
        match role {
            UserRole::Patient => Self {
                can_upload_scans: true,
                can_request_consultation: true,
                ..Self::default()
            },
            UserRole::Specialist => Self {
                can_act_on_consultations: true,
                can_review_scans: true,
                ..Self::default()
            },
            UserRole::Admin => Self {
                can_view_all_consultations: true,
                ..Self::default()
            },
        }
    }
}
