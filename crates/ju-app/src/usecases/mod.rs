pub mod media;
pub mod wizard;
