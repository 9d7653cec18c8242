pub mod client;
pub mod client_event;

pub use client::{create_client, membership_request, TwitchIRCClientType};
pub use client_event::ClientEvent;
