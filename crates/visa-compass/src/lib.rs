//! Backend for the immigration consultancy site: the visa probability
//! calculator and the consultation lead intake.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
