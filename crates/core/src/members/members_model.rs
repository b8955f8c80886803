//! Family member domain models and edit permissions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    DEFAULT_MEMBER_AVATAR, FALLBACK_MEMBER_ID, FALLBACK_MEMBER_NAME, FALLBACK_MEMBER_TITLE,
};
use crate::errors::ValidationError;

/// Permission level of a family member. Wire values are the product's pt-BR
/// labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberRole {
    #[serde(rename = "Administrador")]
    Administrador,
    #[serde(rename = "Cônjuge")]
    Conjuge,
    #[serde(rename = "Membro")]
    Membro,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Administrador => "Administrador",
            MemberRole::Conjuge => "Cônjuge",
            MemberRole::Membro => "Membro",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing a family member.
///
/// `avatar` is either a single emoji or an inline `data:image/...` URI; no
/// other forms exist. `income_source` is free text and may be empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub role: MemberRole,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_source: Option<String>,
}

impl Member {
    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Administrador
    }

    /// The founding administrator written at registration, carrying the
    /// registered name and family title.
    pub fn founding_admin(id: String, name: String, title: String) -> Self {
        Member {
            id,
            name,
            avatar: DEFAULT_MEMBER_AVATAR.to_string(),
            role: MemberRole::Administrador,
            title,
            income_source: None,
        }
    }

    /// The stand-in administrator adopted when a signed-in identity has no
    /// stored household. Uses the fixed id `m1` and the identity's display
    /// name when it has one.
    pub fn fallback_owner(display_name: Option<&str>) -> Self {
        let name = display_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(FALLBACK_MEMBER_NAME);
        Member {
            id: FALLBACK_MEMBER_ID.to_string(),
            name: name.to_string(),
            avatar: DEFAULT_MEMBER_AVATAR.to_string(),
            role: MemberRole::Administrador,
            title: FALLBACK_MEMBER_TITLE.to_string(),
            income_source: None,
        }
    }
}

/// Returns true when the avatar is an uploaded photo rather than an emoji.
pub fn is_data_uri_avatar(avatar: &str) -> bool {
    avatar.starts_with("data:image/")
}

/// Whether `acting` may edit `target`'s profile.
///
/// Administrators edit anyone; every member edits themselves; a spouse may
/// additionally edit members titled `Filho` or `Filha`.
pub fn can_edit_member(acting: &Member, target: &Member) -> bool {
    if acting.role == MemberRole::Administrador {
        return true;
    }
    if acting.id == target.id {
        return true;
    }
    if acting.role == MemberRole::Conjuge && (target.title == "Filho" || target.title == "Filha") {
        return true;
    }
    false
}

/// Prefill for the income-source field when recording income for `member`,
/// built from the member's recorded main income source.
pub fn suggested_income_source(member: &Member) -> Option<String> {
    member
        .income_source
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|source| format!("{} de {}", source, member.name))
}

/// Input model for adding a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub name: String,
    pub avatar: String,
    pub role: MemberRole,
    pub title: String,
    #[serde(default)]
    pub income_source: Option<String>,
}

impl NewMember {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }
        if self.avatar.is_empty() {
            return Err(ValidationError::MissingField("avatar".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()));
        }
        Ok(())
    }

    pub fn into_member(self, id: String) -> Member {
        Member {
            id,
            name: self.name,
            avatar: self.avatar,
            role: self.role,
            title: self.title,
            income_source: self.income_source,
        }
    }
}

/// Save request for the member screen. Create and edit are distinct
/// operations; the id is the tag, never inferred from payload shape.
#[derive(Debug, Clone)]
pub enum MemberUpsert {
    Create(NewMember),
    Edit(Member),
}
