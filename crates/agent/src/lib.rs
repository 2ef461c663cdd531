//! The agent layer of Switchyard.
//!
//! A query enters through the [`Router`], which asks the model which
//! registered specialist should handle it and hands the query over:
//!
//! 1. **Classify**: one model call, reply matched against specialist names
//! 2. **Dispatch**: the chosen [`Agent`] runs with the original query
//! 3. **Reason**: a [`ReactAgent`] alternates model calls and tool calls
//!    until it answers or runs out of turns
//!
//! Every run returns a [`LoopOutcome`]; provider and retrieval failures
//! propagate as errors instead.

pub mod outcome;
pub mod parser;
pub mod patterns;
pub mod prompt;
pub mod specialist;
pub mod team;

pub use outcome::{LoopOutcome, LoopStatus};
pub use parser::{Inspection, ParseAmbiguity, ParsedReply, ResponseParser};
pub use patterns::{RagAgent, ReactAgent, Router, RoutingDecision};
pub use specialist::{Agent, Specialist};
