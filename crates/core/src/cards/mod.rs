//! Cards module - registered payment cards.

mod cards_model;


pub use cards_model::{Card, CardIssuer, NewCard};
