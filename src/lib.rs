//! Lambda function that turns a text prompt into a generated video through
//! the fal.ai queue API.

pub mod common;
pub mod error;
pub mod fal;
pub mod generator;
pub mod handler;
