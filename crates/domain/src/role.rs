use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use stockroom_core::{AppError, AppResult, NonEmptyString};
use uuid::Uuid;

/// Maximum length of a role machine name.
pub const ROLE_NAME_MAX_LENGTH: usize = 64;

/// Machine name of the role seeded as the super-admin role.
pub const SUPER_ADMIN_ROLE_NAME: &str = "super_admin";

/// Unique identifier for a role record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(Uuid);

impl RoleId {
    /// Creates a random role identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a role identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated role machine name, lower snake case (`warehouse_manager`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    /// Creates a validated role name. Input is trimmed and lower-cased.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into().trim().to_lowercase();

        if value.is_empty() {
            return Err(AppError::Validation(
                "role name must not be empty".to_owned(),
            ));
        }

        if value.len() > ROLE_NAME_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "role name must not exceed {ROLE_NAME_MAX_LENGTH} characters"
            )));
        }

        let starts_with_letter = value
            .chars()
            .next()
            .is_some_and(|character| character.is_ascii_lowercase());
        let well_formed = value.chars().all(|character| {
            character.is_ascii_lowercase() || character.is_ascii_digit() || character == '_'
        });

        if !starts_with_letter || !well_formed {
            return Err(AppError::Validation(format!(
                "role name '{value}' must start with a letter and contain only lowercase letters, digits and '_'"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the role name string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for RoleName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0
    }
}

impl Display for RoleName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Distinguishes ordinary roles from the super-admin role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    /// Permissions come exclusively from explicit grants.
    Standard,
    /// Every permission check succeeds regardless of grants.
    SuperAdmin,
}

impl RoleKind {
    /// Maps the persisted `is_super_admin` flag to a role kind.
    #[must_use]
    pub fn from_super_admin_flag(is_super_admin: bool) -> Self {
        if is_super_admin {
            Self::SuperAdmin
        } else {
            Self::Standard
        }
    }

    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::SuperAdmin => "super_admin",
        }
    }
}

/// Named bundle of permissions assigned to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: RoleName,
    display_name: NonEmptyString,
    description: Option<String>,
    is_active: bool,
    kind: RoleKind,
}

impl Role {
    /// Creates a validated role.
    pub fn new(
        id: RoleId,
        name: RoleName,
        display_name: impl Into<String>,
        description: Option<String>,
        is_active: bool,
        kind: RoleKind,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name,
            display_name: NonEmptyString::new(display_name)?,
            description: normalize_description(description),
            is_active,
            kind,
        })
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the unique machine name.
    #[must_use]
    pub fn name(&self) -> &RoleName {
        &self.name
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &NonEmptyString {
        &self.display_name
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether the role currently confers its grants.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the role kind.
    #[must_use]
    pub fn kind(&self) -> RoleKind {
        self.kind
    }

    /// Returns whether this is the super-admin role.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.kind == RoleKind::SuperAdmin
    }
}

/// Trims a free-text description and drops it when blank.
#[must_use]
pub fn normalize_description(description: Option<String>) -> Option<String> {
    description.and_then(|value| {
        let trimmed = value.trim().to_owned();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}
