//! Bus departure board server.
//!
//! Answers "which buses leave this stop next, and where do they go?" from a
//! precompiled timetable dataset.

pub mod board;
pub mod config;
pub mod departures;
pub mod domain;
pub mod schedule;
pub mod search;
pub mod web;

#[cfg(test)]
mod test_support;
