pub mod emotion;
pub mod watson;
