//! Role tags and the single normalize/strip pair used everywhere in this
//! crate. Roles are stored and published in the canonical prefixed form
//! (`ROLE_TEACHER`); the guard strips the prefix before membership checks.

/// Namespace prefix carried by every canonical role tag.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Normalize a raw role string to its canonical prefixed upper-case form.
///
/// Accepts bare (`teacher`), mixed-case (`Teacher`), or already prefixed
/// (`ROLE_teacher`) input. Empty or whitespace-only input yields `None`,
/// never `Some("ROLE_")`.
pub fn normalize_role(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let upper = trimmed.to_uppercase();
    let bare = upper.strip_prefix(ROLE_PREFIX).unwrap_or(&upper);
    if bare.is_empty() {
        return None;
    }

    Some(format!("{ROLE_PREFIX}{bare}"))
}

/// Remove the canonical prefix if present. The inverse of [`normalize_role`]
/// for membership checks and landing-page lookup.
pub fn strip_role_prefix(role: &str) -> &str {
    role.strip_prefix(ROLE_PREFIX).unwrap_or(role)
}

/// The permission classes the console knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownRole {
    Student,
    Teacher,
    TeachingAssistant,
    Parent,
    Manager,
    Accountant,
    Admin,
}

impl KnownRole {
    /// Resolve a role tag to a known class. Tolerates the prefix, numeric
    /// tags written by older clients, and common spelling variants.
    pub fn resolve(tag: &str) -> Option<Self> {
        let upper = tag.trim().to_uppercase();
        let bare = upper.strip_prefix(ROLE_PREFIX).unwrap_or(&upper);

        match bare {
            "1" | "STUDENT" => Some(Self::Student),
            "2" | "TEACHER" => Some(Self::Teacher),
            "TEACHING_ASSISTANT" => Some(Self::TeachingAssistant),
            "PARENT" => Some(Self::Parent),
            "3" | "MANAGER" => Some(Self::Manager),
            "4" | "ACCOUNTANT" | "ACCOUNTING" => Some(Self::Accountant),
            "5" | "ADMIN" | "ADMINISTRATOR" | "ADMINISTRATION" | "ADMINISTRATIVE" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Bare canonical tag, without the prefix.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Teacher => "TEACHER",
            Self::TeachingAssistant => "TEACHING_ASSISTANT",
            Self::Parent => "PARENT",
            Self::Manager => "MANAGER",
            Self::Accountant => "ACCOUNTANT",
            Self::Admin => "ADMIN",
        }
    }

    /// Landing page a user of this class is sent to when denied elsewhere.
    pub fn landing_page(self) -> &'static str {
        match self {
            Self::Student => "/student",
            Self::Teacher => "/teacher",
            Self::TeachingAssistant => "/teaching-assistant",
            Self::Parent => "/parent",
            Self::Manager => "/manager",
            Self::Accountant => "/accountant",
            Self::Admin => "/admin",
        }
    }

    pub const ALL: [KnownRole; 7] = [
        Self::Student,
        Self::Teacher,
        Self::TeachingAssistant,
        Self::Parent,
        Self::Manager,
        Self::Accountant,
        Self::Admin,
    ];
}
