//! Command handlers for the pdoc-prep CLI.
//!
//! Each mode has its own module with a public handler function
//! that `main()` dispatches to.

pub mod rewrite;
pub mod run;
