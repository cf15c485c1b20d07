use serde::{Deserialize, Serialize};

/// Lifecycle status of a match. SCHEDULED is the initial state; COMPLETED is
/// terminal and entered once both participations carry an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchStatus {
    Scheduled,
    Completed,
}

/// Outcome of one participation. The opponent's outcome is never free: it is
/// forced to the complement of whatever is recorded first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchOutcome {
    Win,
    Loss,
    Draw,
}

impl MatchOutcome {
    /// The outcome forced on the opponent: WIN↔LOSS, DRAW↔DRAW.
    pub fn complement(self) -> MatchOutcome {
        match self {
            MatchOutcome::Win => MatchOutcome::Loss,
            MatchOutcome::Loss => MatchOutcome::Win,
            MatchOutcome::Draw => MatchOutcome::Draw,
        }
    }

    /// Whether `self` and `other` form a legal completed pair.
    pub fn is_complementary(self, other: MatchOutcome) -> bool {
        other == self.complement()
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MatchRow {
    pub id: String,
    pub activity_id: String,
    pub scheduled_at: String,
    pub status: MatchStatus,
    pub created_at: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MatchParticipationRow {
    pub match_id: String,
    pub registrant_id: String,
    pub outcome: Option<MatchOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_swaps_win_and_loss() {
        assert_eq!(MatchOutcome::Win.complement(), MatchOutcome::Loss);
        assert_eq!(MatchOutcome::Loss.complement(), MatchOutcome::Win);
        assert_eq!(MatchOutcome::Draw.complement(), MatchOutcome::Draw);
    }

    #[test]
    fn complementary_pairs() {
        assert!(MatchOutcome::Win.is_complementary(MatchOutcome::Loss));
        assert!(MatchOutcome::Draw.is_complementary(MatchOutcome::Draw));
        assert!(!MatchOutcome::Win.is_complementary(MatchOutcome::Win));
        assert!(!MatchOutcome::Draw.is_complementary(MatchOutcome::Loss));
    }
}
