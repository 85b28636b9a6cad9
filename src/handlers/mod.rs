pub mod habit_logs;
pub mod habits;
pub mod health;
pub mod params;
pub mod posts;
pub mod stats;
