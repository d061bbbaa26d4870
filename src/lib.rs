//! Facility MCDA - Multi-criteria ranking engine for facility planning
//!
//! This crate ranks candidate facilities with TOPSIS and reports how robust
//! that ranking is under uncertainty: per-criterion variability, weight
//! sensitivity, Monte Carlo perturbation, and fuzzy weights.

pub mod application;
pub mod config;
pub mod domain;
