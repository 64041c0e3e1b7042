//! Infrastructure layer: file loaders and the SMTP transport

pub mod files;
pub mod smtp;
