pub mod tracking;
pub mod wizard;
