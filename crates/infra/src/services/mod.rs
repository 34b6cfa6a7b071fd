mod email;

pub use email::{DefaultEmailTransport, IEmailTransport, InMemoryEmailTransport, OutgoingEmail};
