pub mod concepts;
pub mod goals;
pub mod health;
pub mod learnings;
pub mod schedules;
