pub mod idna;
pub mod percent;
