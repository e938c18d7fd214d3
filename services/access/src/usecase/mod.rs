pub mod access_code;
pub mod generator;
pub mod retention;
