pub mod availability;
pub mod room;
pub mod slot;
