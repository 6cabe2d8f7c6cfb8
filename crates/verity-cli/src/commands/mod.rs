pub mod analytics;
pub mod dispatch;
pub mod migrate;
pub mod schema;
pub mod task;
