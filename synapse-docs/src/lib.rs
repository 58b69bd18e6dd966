//! Internal API of synapse-docs, exposed for the integration tests. It is not
//! meant to be used as a library.
pub mod cli;
pub mod config;
pub mod error;
pub mod html;
pub mod landing;
pub mod utils;
