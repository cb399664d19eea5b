pub mod domain;
pub mod error;
pub mod presenter;

#[cfg(test)]
mod testing;
