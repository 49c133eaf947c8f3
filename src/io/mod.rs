pub mod chunk;
pub mod value;
