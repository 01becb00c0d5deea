//! Citizen portal for Forest Rights Act applications: a four-step application
//! wizard, status tracking and officer reporting.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
