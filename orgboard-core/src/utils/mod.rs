pub mod ids;
pub mod time;

pub use ids::new_message_id;
pub use time::now_utc;
