//! Wellbeing Chat - scripted wellbeing questionnaire
//!
//! A fixed bank of ten questions is walked through as a three-step
//! conversation. The finished transcript gets a keyword-based sentiment
//! label and is saved, best effort, to a MongoDB collection.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
