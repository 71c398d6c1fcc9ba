pub mod availability;
pub mod calendar;
pub mod catalog;
pub mod slot_filter;
