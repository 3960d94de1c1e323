#![warn(rust_2018_idioms)]
#![allow(dead_code)]

pub mod agent;
pub mod attributes;
pub mod candidate;
pub mod checklist;
pub mod error;
pub mod rand;

pub use agent::{Agent, Credentials, Event};
pub use error::Error;
