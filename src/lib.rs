pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod normalize;
pub mod recipe_matcher;
pub mod reference;
pub mod report;
pub mod safety_classifier;
pub mod safety_overview;
pub mod session;
