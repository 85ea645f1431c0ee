pub mod dto;
pub mod error;
pub mod ports;
pub mod services;
#[cfg(test)]
pub(crate) mod test_support;
pub mod use_cases;
