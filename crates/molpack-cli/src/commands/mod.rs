pub mod input;
pub mod pack;
