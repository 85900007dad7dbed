// Module exports for models

pub mod document;
