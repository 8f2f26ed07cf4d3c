//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod send_ping;

pub use send_ping::{decode_send_ping_json_response, encode_send_ping_json};
