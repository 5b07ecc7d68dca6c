// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]

pub mod cli;
pub mod logger;
pub mod stages;

#[cfg(test)]
mod test_helpers;
