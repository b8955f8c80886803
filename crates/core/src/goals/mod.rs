//! Goals module - savings goal models and progress math.

mod goals_model;


pub use goals_model::{Goal, GoalUpsert, NewGoal};
