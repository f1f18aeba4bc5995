mod boundary;
mod error_model;
mod support;
