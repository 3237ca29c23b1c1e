pub mod day;
pub mod holiday;
pub mod policy;
pub mod reason;
pub mod summary;
pub mod window;
