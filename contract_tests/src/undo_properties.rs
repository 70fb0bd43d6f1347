//! Undo behavior contract tests
//!
//! End-to-end grouping and replay behavior, driven through the simulated
//! host. Each test pins one observable property of the undo session.
