pub mod activities;
pub mod matches;
pub mod registrants;

pub use activities::ActivityRow;
pub use matches::{MatchOutcome, MatchParticipationRow, MatchRow, MatchStatus};
pub use registrants::{RegistrantRow, Role};
