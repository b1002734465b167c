//! orgboard-core: tipi condivisi dal server e dai test (modelli, DTO HTTP, esiti, regole di validazione).
//! Niente I/O: lo storage e il trasporto vivono in orgboard-server.

pub mod error;
pub mod models;
pub mod outcome;
pub mod protocol;
pub mod utils;
pub mod validation;

// Re-export utili per ridurre i percorsi nel crate server
pub use error::ValidationErrors;
pub use models::message::Message;
pub use outcome::Outcome;
pub use protocol::http::MessageRequest;
pub use utils::{new_message_id, now_utc};
