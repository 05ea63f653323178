pub mod access;
pub mod error;
pub mod fields;
pub mod loader;
pub mod ports;
pub mod repo;
pub mod service;

#[cfg(test)]
mod service_test;
#[cfg(test)]
mod test_support;
