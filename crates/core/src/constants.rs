/// Decimal precision for monetary display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Fixed member id used when a stored household has no member list to adopt
pub const FALLBACK_MEMBER_ID: &str = "m1";

/// Default member display name when the identity carries none
pub const FALLBACK_MEMBER_NAME: &str = "Eu";

/// Family title of the fallback member
pub const FALLBACK_MEMBER_TITLE: &str = "Admin";

/// Default avatar for newly created members
pub const DEFAULT_MEMBER_AVATAR: &str = "😊";

/// Default family profile name for a fresh household
pub const DEFAULT_FAMILY_NAME: &str = "Minha Família";

/// Default family profile avatar for a fresh household
pub const DEFAULT_FAMILY_AVATAR: &str = "👨‍👩‍👧‍👦";

/// Family titles offered at registration
pub const REGISTRATION_TITLES: &[&str] = &[
    "Pai", "Mãe", "Filho", "Filha", "Avô", "Avó", "Tio", "Tia", "Outro",
];

/// Family titles offered when editing an existing member
pub const MEMBER_TITLES: &[&str] = &[
    "Pai", "Mãe", "Filho", "Filha", "Avô", "Avó", "Tio", "Tia", "Primo", "Prima", "Outro",
];
