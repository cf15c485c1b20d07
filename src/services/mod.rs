pub mod leaderboard_service;
pub mod locks;
pub mod match_service;
pub mod pairing;
pub mod registrant_service;
pub mod roster_service;
pub mod vote_service;
