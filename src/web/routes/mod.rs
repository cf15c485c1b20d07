pub mod activities;
pub mod leaderboard;
pub mod matches;
pub mod registrants;
pub mod votes;
