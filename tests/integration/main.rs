mod binary;
mod common;
mod config;
mod store;
