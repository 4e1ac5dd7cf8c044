//! Data models for the team roster service.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod member;

pub use member::*;
