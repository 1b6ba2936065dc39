pub mod domain;
pub mod error;
pub mod list;
pub mod protocol;

#[cfg(test)]
#[path = "tests/list_tests.rs"]
mod list_tests;
