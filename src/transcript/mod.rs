//! Transcript assembly core.
//!
//! Reduces the realtime protocol's heterogeneous event stream into two
//! ordered transcripts: interviewer turns and candidate turns. Text lands
//! here through three stages: extraction from an arbitrary event shape
//! ([`extract`]), duplicate suppression ([`dedupe`]), and ordered
//! accumulation ([`accumulator`]).

pub mod accumulator;
pub mod dedupe;
pub mod extract;

pub use accumulator::{PrintSink, Speaker, Transcript, Turn, TurnAccumulator, TurnSink};
pub use dedupe::DedupeGate;
pub use extract::{extract_text, strip_markup};
