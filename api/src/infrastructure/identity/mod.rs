pub mod cognito;
pub mod jwks;
