//! Realtime protocol plumbing.
//!
//! [`router`] normalizes the inbound event stream into transcript
//! operations; [`outbound`] builds the fixed set of messages we send;
//! [`channel`] is the bidirectional frame transport behind the
//! [`channel::EventChannel`] seam.

pub mod channel;
pub mod outbound;
pub mod router;

pub use channel::{EventChannel, WsChannel};
pub use outbound::{InputAudioAppend, ResponseCreate, SessionUpdate};
pub use router::{handle_frame, route_event};
