pub mod envelope;

pub use envelope::{parse_envelope, parse_user, read_body, CommandEnvelope};
