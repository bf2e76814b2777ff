//! Life Expectancy Dashboard
//!
//! Reshapes a wide per-country life expectancy table into long format, fits a
//! per-country polynomial regression to extrapolate future values, and renders
//! trends, rankings, comparisons and a world snapshot.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;
