pub mod chlorine;
pub mod dosing;
pub mod file_formats;
pub mod lsi;
pub mod standards;
pub mod treatment;
pub mod water;
