//! Response helpers shared by the route handlers

pub mod error;

pub use error::{
    domain_error_response, payload_error_response, status_for_code, validation_error_response,
};
