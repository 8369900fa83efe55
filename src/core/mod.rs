//! Core data types shared by the entropy engine and the triage runtime.

pub mod triage;
