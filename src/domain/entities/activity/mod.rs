pub mod activity_log;
pub mod search_history;
