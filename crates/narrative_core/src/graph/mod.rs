//! Node-graph view over the record set.
//!
//! # Responsibility
//! - Filter records by table selection, mission or zone.
//! - Lay records out as mission, zone or dialogue nodes.
//! - Hold per-session node view state (edges, helper notes, saved layout).

pub mod layout;
pub mod view;
