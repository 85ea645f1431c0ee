pub mod follow;
pub mod follow_stats;
pub mod get_profile;
pub mod update_profile;
