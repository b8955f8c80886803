//! Households module - the per-family aggregate document and its store
//! contract.

mod households_model;
mod households_traits;


pub use households_model::{FamilyProfile, Household};
pub use households_traits::{HouseholdStoreTrait, Revision, StoredHousehold};
