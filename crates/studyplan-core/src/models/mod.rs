pub mod generated;
pub mod goal;
pub mod learning;
pub mod schedule;
pub mod schedule_request;
