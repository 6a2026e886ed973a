//! Statecraft - war, peace and conquered-territory simulation core
//!
//! Wars are declared, fought day by day under a chosen strategy and ended by
//! negotiation, surrender or decisive victory. Land that changes hands is
//! held as territory that may rebel, and defeated sides pay reparations.

pub mod core;
pub mod events;
pub mod simulation;
pub mod territory;
pub mod war;
