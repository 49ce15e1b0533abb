//! Shift Schedule and Attendance Engine
//!
//! This crate resolves which shift an employee is expected to work on a
//! date from three competing sources (daily overrides, a recurring weekly
//! template and date-range assignments), validates assignments against
//! overlaps, and turns clock events into attendance records with worked
//! hours and lateness, including shifts that cross midnight.

#![warn(missing_docs)]

pub mod api;
pub mod attendance;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod schedule;
pub mod store;
