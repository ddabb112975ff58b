// Library interface for the directory tree model and its CLI host

pub mod config;
pub mod services;
pub mod view;
