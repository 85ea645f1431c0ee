pub mod me;
pub mod refresh_token;
pub mod session;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod verify_email;
