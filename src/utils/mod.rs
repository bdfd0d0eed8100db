// Shared helpers: civil date parsing and the configuration error type

pub mod date;
pub mod error;
