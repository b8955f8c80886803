//! Members module - family member models and edit permissions.

mod members_model;


pub use members_model::{
    can_edit_member, is_data_uri_avatar, suggested_income_source, Member, MemberRole, MemberUpsert,
    NewMember,
};
