//! Feature implementations for studydesk.
//!
//! - Session cycle: study countdown, break offers, exercise reminders
//! - Todo list
//! - Study and break history

pub mod cycle;
pub mod history;
pub mod todos;
