pub mod balance;
pub mod chlorine;
pub mod dose;
pub mod error;
pub mod logger;
pub mod lsi;
pub mod salt;
pub mod standards;
pub mod thiosulfate;
