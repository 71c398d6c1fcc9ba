pub mod email;
pub mod scheduler;
