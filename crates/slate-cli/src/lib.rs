//! Shared library surface for the slate CLI.
//!
//! The binary wires `cli`/`commands`/`summary` together; the pieces other
//! crates or tests may want (logging setup, the extract store) live here.

pub mod logging;
pub mod store;
