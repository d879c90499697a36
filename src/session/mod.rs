// src/session/mod.rs
// =============================================================================
// This module runs the interactive session.
//
// Submodules:
// - driver: the state machine (page count -> fetch -> pick repo -> check)
// - input: where operator answers come from (stdin or a test script)
// - report: how results are printed (text or JSON)
// =============================================================================

mod driver;
mod input;
mod report;

pub use driver::{Mode, SelectionFallback, Session, SessionOptions};
pub use input::{stdin_commands, CommandSource};
