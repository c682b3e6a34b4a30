pub mod dropout;
pub mod loudness;
