//! Waymark CLI library.
//!
//! Argument value types and report writing shared by the `waymark` binary's
//! subcommands.

pub mod output;
