pub mod error;
pub mod validation;
pub mod auth;
pub mod notice;
pub mod model;
pub mod db;
pub mod ops;
pub mod queries;
pub mod migrate;
pub mod cli;
