mod client;
mod common;

mod admin;
mod follows;
mod matches;
