pub mod attendance_service;
pub mod classify;
pub mod edit;
pub mod reconcile;
pub mod suggest;
pub mod summary;

#[cfg(test)]
mod attendance_service_test;
