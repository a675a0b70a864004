pub mod app;
pub mod dates;
pub mod domain;
pub mod error;
pub mod keys;
pub mod metadata;
pub mod s3;
