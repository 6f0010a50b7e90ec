pub mod action;
pub mod cards;
pub mod cli;
pub mod comparator;
pub mod config;
pub mod display;
pub mod distribution;
pub mod error;
pub mod grader;
pub mod hand;
pub mod ranges;
pub mod reference;
pub mod scenario;
pub mod stack;
