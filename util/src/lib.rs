//! Shared utilities for the grading workspace.

pub mod config;
