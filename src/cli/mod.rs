//! CLI infrastructure for the dotsbox toolkit
//!
//! This module provides the command-line interface for training, comparing
//! and playing against value-table agents.

pub mod commands;
pub mod config;
pub mod output;
