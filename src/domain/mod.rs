//! Domain layer: strong types with validation and invariants (no I/O).

mod response;
mod status;
mod validation;
mod value;

pub use response::SendPingResponse;
pub use status::SendStatus;
pub use validation::ValidationError;
pub use value::{ApiBase, DraftMessage, MessageBody};
