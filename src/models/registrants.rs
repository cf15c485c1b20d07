use serde::{Deserialize, Serialize};

/// Role of a registrant. Organizers schedule matches and record outcomes,
/// participants vote and appear on the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Participant,
    Organizer,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RegistrantRow {
    pub id: String,
    pub code: String,
    pub full_name: String,
    pub role: Role,
    pub active: bool,
    pub created_at: String,
}
