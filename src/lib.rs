//! ACH Workbench - Analysis of Competing Hypotheses matrix engine.
//!
//! This crate implements the ACH structured-analysis technique: matrices of
//! hypotheses and evidence, analyst consistency ratings, and the derived
//! scoring, diagnosticity, sensitivity, and evidence-gap analyses.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
