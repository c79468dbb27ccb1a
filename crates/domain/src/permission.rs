use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stockroom_core::{AppError, AppResult, NonEmptyString};
use uuid::Uuid;

/// Maximum length of a canonical permission machine name.
pub const PERMISSION_NAME_MAX_LENGTH: usize = 128;

/// Canonical, dot-namespaced permission machine name such as `inventory.view`.
///
/// Every permission string entering the system passes through
/// [`PermissionName::parse`], so set-membership checks only ever compare
/// canonical values. Accepted spellings include `inventory.view`,
/// `INVENTORY_VIEW`, `Inventory:View` and `inventory/view`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionName(String);

impl PermissionName {
    /// Canonicalizes and validates a raw permission name.
    ///
    /// Lower-cases the value, maps `:` and `/` to `.` and `-` to `_`. A name
    /// with no `.` at all is treated as upper-snake case, where the first `_`
    /// separates the namespace (`INVENTORY_BULK_UPLOAD` becomes
    /// `inventory.bulk_upload`).
    pub fn parse(value: &str) -> AppResult<Self> {
        let mut canonical: String = value
            .trim()
            .to_lowercase()
            .chars()
            .map(|character| match character {
                ':' | '/' => '.',
                '-' => '_',
                other => other,
            })
            .collect();

        if !canonical.contains('.')
            && let Some(index) = canonical.find('_')
        {
            canonical.replace_range(index..=index, ".");
        }

        validate_canonical(value, canonical.as_str())?;
        Ok(Self(canonical))
    }

    /// Wraps a name that is already known to be canonical.
    pub(crate) fn from_canonical(value: &'static str) -> Self {
        Self(value.to_owned())
    }

    /// Returns the canonical string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the namespace segment (`inventory` for `inventory.view`).
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.0.split('.').next().unwrap_or_default()
    }
}

fn validate_canonical(raw: &str, canonical: &str) -> AppResult<()> {
    if canonical.is_empty() {
        return Err(AppError::Validation(
            "permission name must not be empty".to_owned(),
        ));
    }

    if canonical.len() > PERMISSION_NAME_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "permission name must not exceed {PERMISSION_NAME_MAX_LENGTH} characters"
        )));
    }

    let segments: Vec<&str> = canonical.split('.').collect();
    if segments.len() < 2 {
        return Err(AppError::Validation(format!(
            "permission name '{raw}' must be namespaced like 'inventory.view'"
        )));
    }

    let well_formed = segments.iter().all(|segment| {
        !segment.is_empty()
            && segment.chars().all(|character| {
                character.is_ascii_lowercase() || character.is_ascii_digit() || character == '_'
            })
    });

    if !well_formed {
        return Err(AppError::Validation(format!(
            "permission name '{raw}' may only contain letters, digits and '_' between '.' separators"
        )));
    }

    Ok(())
}

impl FromStr for PermissionName {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for PermissionName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<PermissionName> for String {
    fn from(value: PermissionName) -> Self {
        value.0
    }
}

impl Display for PermissionName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Unique identifier for a permission record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionId(Uuid);

impl PermissionId {
    /// Creates a random permission identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a permission identifier from an existing UUID value.
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

impl Default for PermissionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Permission reference data seeded into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDefinition {
    id: PermissionId,
    name: PermissionName,
    display_name: NonEmptyString,
    category: NonEmptyString,
}

impl PermissionDefinition {
    /// Creates a validated permission definition.
    pub fn new(
        id: PermissionId,
        name: PermissionName,
        display_name: impl Into<String>,
        category: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name,
            display_name: NonEmptyString::new(display_name)?,
            category: NonEmptyString::new(category)?,
        })
    }

    /// Returns the permission identifier.
    #[must_use]
    pub fn id(&self) -> PermissionId {
        self.id
    }

    /// Returns the canonical machine name.
    #[must_use]
    pub fn name(&self) -> &PermissionName {
        &self.name
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &NonEmptyString {
        &self.display_name
    }

    /// Returns the category label.
    #[must_use]
    pub fn category(&self) -> &NonEmptyString {
        &self.category
    }
}

/// Permissions shipped with the seeded catalog.
///
/// The storage values match `migrations/0002_seed_permission_catalog.sql`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogPermission {
    /// Allows viewing stock items and levels.
    InventoryView,
    /// Allows creating stock items.
    InventoryCreate,
    /// Allows editing stock items and adjusting levels.
    InventoryUpdate,
    /// Allows removing stock items.
    InventoryDelete,
    /// Allows spreadsheet bulk imports of stock items.
    InventoryBulkUpload,
    /// Allows viewing orders.
    OrdersView,
    /// Allows creating orders.
    OrdersCreate,
    /// Allows updating order status.
    OrdersUpdate,
    /// Allows viewing suppliers.
    SuppliersView,
    /// Allows managing suppliers.
    SuppliersManage,
    /// Allows viewing reports and dashboards.
    ReportsView,
    /// Allows listing user accounts.
    UsersView,
    /// Allows provisioning, activating and re-assigning user accounts.
    UsersManage,
    /// Allows listing roles and the permission catalog.
    RolesView,
    /// Allows creating roles and changing grants.
    RolesManage,
    /// Allows reading the audit log.
    AuditView,
}

impl CatalogPermission {
    /// Returns the canonical storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InventoryView => "inventory.view",
            Self::InventoryCreate => "inventory.create",
            Self::InventoryUpdate => "inventory.update",
            Self::InventoryDelete => "inventory.delete",
            Self::InventoryBulkUpload => "inventory.bulk_upload",
            Self::OrdersView => "orders.view",
            Self::OrdersCreate => "orders.create",
            Self::OrdersUpdate => "orders.update",
            Self::SuppliersView => "suppliers.view",
            Self::SuppliersManage => "suppliers.manage",
            Self::ReportsView => "reports.view",
            Self::UsersView => "users.view",
            Self::UsersManage => "users.manage",
            Self::RolesView => "roles.view",
            Self::RolesManage => "roles.manage",
            Self::AuditView => "audit.view",
        }
    }

    /// Returns the seeded display name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::InventoryView => "View inventory",
            Self::InventoryCreate => "Create inventory items",
            Self::InventoryUpdate => "Update inventory items",
            Self::InventoryDelete => "Delete inventory items",
            Self::InventoryBulkUpload => "Bulk upload inventory",
            Self::OrdersView => "View orders",
            Self::OrdersCreate => "Create orders",
            Self::OrdersUpdate => "Update orders",
            Self::SuppliersView => "View suppliers",
            Self::SuppliersManage => "Manage suppliers",
            Self::ReportsView => "View reports",
            Self::UsersView => "View users",
            Self::UsersManage => "Manage users",
            Self::RolesView => "View roles",
            Self::RolesManage => "Manage roles",
            Self::AuditView => "View audit log",
        }
    }

    /// Returns the seeded category label.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InventoryView
            | Self::InventoryCreate
            | Self::InventoryUpdate
            | Self::InventoryDelete
            | Self::InventoryBulkUpload => "Inventory",
            Self::OrdersView | Self::OrdersCreate | Self::OrdersUpdate => "Orders",
            Self::SuppliersView | Self::SuppliersManage => "Suppliers",
            Self::ReportsView => "Reports",
            Self::UsersView | Self::UsersManage | Self::RolesView | Self::RolesManage => {
                "Administration"
            }
            Self::AuditView => "Security",
        }
    }

    /// Returns the canonical permission name.
    #[must_use]
    pub fn name(&self) -> PermissionName {
        PermissionName::from_canonical(self.as_str())
    }

    /// Returns all catalog permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[CatalogPermission] = &[
            CatalogPermission::InventoryView,
            CatalogPermission::InventoryCreate,
            CatalogPermission::InventoryUpdate,
            CatalogPermission::InventoryDelete,
            CatalogPermission::InventoryBulkUpload,
            CatalogPermission::OrdersView,
            CatalogPermission::OrdersCreate,
            CatalogPermission::OrdersUpdate,
            CatalogPermission::SuppliersView,
            CatalogPermission::SuppliersManage,
            CatalogPermission::ReportsView,
            CatalogPermission::UsersView,
            CatalogPermission::UsersManage,
            CatalogPermission::RolesView,
            CatalogPermission::RolesManage,
            CatalogPermission::AuditView,
        ];

        ALL
    }
}

impl FromStr for CatalogPermission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let name = PermissionName::parse(value)?;
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == name.as_str())
            .ok_or_else(|| {
                AppError::Validation(format!("unknown catalog permission '{name}'"))
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use proptest::prelude::*;

    use super::{CatalogPermission, PermissionName};

    #[test]
    fn upper_snake_case_is_canonicalized() {
        let parsed = PermissionName::parse("INVENTORY_BULK_UPLOAD");
        assert_eq!(
            parsed.map(String::from).unwrap_or_default(),
            "inventory.bulk_upload"
        );
    }

    #[test]
    fn colon_and_slash_separators_are_canonicalized() {
        for raw in ["Orders:View", "orders/view", "  orders.VIEW  "] {
            let parsed = PermissionName::parse(raw);
            assert_eq!(parsed.map(String::from).unwrap_or_default(), "orders.view");
        }
    }

    #[test]
    fn unnamespaced_permission_is_rejected() {
        assert!(PermissionName::parse("inventory").is_err());
        assert!(PermissionName::parse("").is_err());
        assert!(PermissionName::parse("inventory..view").is_err());
        assert!(PermissionName::parse("inventory.view!").is_err());
    }

    #[test]
    fn catalog_names_are_canonical_and_unique() {
        let mut seen = HashSet::new();
        for permission in CatalogPermission::all() {
            let parsed = PermissionName::parse(permission.as_str());
            assert_eq!(
                parsed.map(String::from).unwrap_or_default(),
                permission.as_str()
            );
            assert!(seen.insert(permission.as_str()));
        }
    }

    #[test]
    fn catalog_permission_parses_any_spelling() {
        let parsed = CatalogPermission::from_str("ROLES_MANAGE");
        assert!(matches!(parsed, Ok(CatalogPermission::RolesManage)));
    }

    #[test]
    fn namespace_is_first_segment() {
        assert_eq!(CatalogPermission::InventoryBulkUpload.name().namespace(), "inventory");
    }

    proptest! {
        #[test]
        fn canonicalization_is_idempotent(
            namespace in "[a-z][a-z0-9]{0,8}",
            action in "[a-z][a-z0-9_]{0,12}",
        ) {
            let canonical = format!("{namespace}.{action}");
            let first = PermissionName::parse(canonical.as_str());
            prop_assert!(first.is_ok());
            let first = first.map(String::from).unwrap_or_default();
            prop_assert_eq!(first.as_str(), canonical.as_str());

            let second = PermissionName::parse(first.as_str()).map(String::from).unwrap_or_default();
            prop_assert_eq!(second, first);
        }

        #[test]
        fn upper_snake_spelling_matches_dot_spelling(
            namespace in "[a-z][a-z0-9]{0,8}",
            action in "[a-z][a-z0-9_]{0,12}",
        ) {
            let upper_snake = format!("{namespace}_{action}").to_uppercase();
            let dotted = format!("{namespace}.{action}");
            let from_upper = PermissionName::parse(upper_snake.as_str());
            let from_dotted = PermissionName::parse(dotted.as_str());
            prop_assert!(from_upper.is_ok());
            prop_assert_eq!(
                from_upper.map(String::from).unwrap_or_default(),
                from_dotted.map(String::from).unwrap_or_default()
            );
        }
    }
}
