/// Ember shared types
///
/// Domain models (`User`, `Streak`) and the action-tagged wire format spoken
/// with the streak service.
pub mod api;
pub mod models;
