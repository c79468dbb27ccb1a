use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use stockroom_core::{AppError, AppResult};
use stockroom_domain::{
    AuditAction, CatalogPermission, EmailAddress, PermissionDefinition, PermissionId,
    PermissionName, Role, RoleId, RoleKind, RoleName, SUPER_ADMIN_ROLE_NAME, User, UserId,
};

use crate::security_admin_ports::{
    CreateRoleInput, RoleDefinition, SecurityAdminRepository, UpdateRoleInput,
};
use crate::{
    AuditEvent, AuditLogEntry, AuditLogQuery, AuditLogRepository, AuditRepository,
    AuthorizationRepository, AuthorizationService, RoleGrants,
};

use super::SecurityAdminService;

#[derive(Default)]
struct FakeSecurityStore {
    roles: Mutex<Vec<RoleDefinition>>,
    events: Mutex<Vec<AuditEvent>>,
    last_query: Mutex<Option<AuditLogQuery>>,
}

impl FakeSecurityStore {
    async fn seed_role(
        &self,
        name: &str,
        kind: RoleKind,
        permissions: &[CatalogPermission],
    ) -> RoleId {
        let role_id = RoleId::new();
        let role = Role::new(role_id, role_name(name), name, None, true, kind)
            .unwrap_or_else(|_| panic!("valid role"));
        self.roles.lock().await.push(RoleDefinition {
            role,
            permissions: permissions.iter().map(CatalogPermission::name).collect(),
            user_count: 1,
        });
        role_id
    }

    async fn events(&self) -> Vec<AuditAction> {
        self.events
            .lock()
            .await
            .iter()
            .map(|event| event.action)
            .collect()
    }
}

#[async_trait]
impl AuthorizationRepository for FakeSecurityStore {
    async fn find_role_grants(&self, role_id: RoleId) -> AppResult<Option<RoleGrants>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|definition| definition.role.id() == role_id)
            .map(|definition| RoleGrants {
                role: definition.role.clone(),
                permissions: definition.permissions.clone(),
            }))
    }

    async fn find_role_by_name(&self, role_name: &RoleName) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|definition| definition.role.name() == role_name)
            .map(|definition| definition.role.clone()))
    }
}

#[async_trait]
impl SecurityAdminRepository for FakeSecurityStore {
    async fn list_permissions(&self) -> AppResult<Vec<PermissionDefinition>> {
        CatalogPermission::all()
            .iter()
            .map(|permission| {
                PermissionDefinition::new(
                    PermissionId::new(),
                    permission.name(),
                    permission.display_name(),
                    permission.category(),
                )
            })
            .collect()
    }

    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        Ok(self.roles.lock().await.clone())
    }

    async fn find_role(&self, role_name: &RoleName) -> AppResult<Option<RoleDefinition>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|definition| definition.role.name() == role_name)
            .cloned())
    }

    async fn create_role(&self, input: CreateRoleInput) -> AppResult<RoleDefinition> {
        let mut roles = self.roles.lock().await;
        if roles
            .iter()
            .any(|definition| definition.role.name() == &input.name)
        {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                input.name
            )));
        }

        let definition = RoleDefinition {
            role: Role::new(
                RoleId::new(),
                input.name,
                input.display_name,
                input.description,
                true,
                RoleKind::Standard,
            )?,
            permissions: input.permissions,
            user_count: 0,
        };
        roles.push(definition.clone());
        Ok(definition)
    }

    async fn update_role(
        &self,
        role_name: &RoleName,
        input: UpdateRoleInput,
    ) -> AppResult<RoleDefinition> {
        let mut roles = self.roles.lock().await;
        let definition = roles
            .iter_mut()
            .find(|definition| definition.role.name() == role_name)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_name}' was not found")))?;
        definition.role = Role::new(
            definition.role.id(),
            role_name.clone(),
            input.display_name,
            input.description,
            input.is_active,
            definition.role.kind(),
        )?;
        Ok(definition.clone())
    }

    async fn delete_role(&self, role_name: &RoleName) -> AppResult<()> {
        self.roles
            .lock()
            .await
            .retain(|definition| definition.role.name() != role_name);
        Ok(())
    }

    async fn grant_permission(
        &self,
        role_name: &RoleName,
        permission: &PermissionName,
    ) -> AppResult<bool> {
        let mut roles = self.roles.lock().await;
        let definition = roles
            .iter_mut()
            .find(|definition| definition.role.name() == role_name)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_name}' was not found")))?;
        if definition.permissions.contains(permission) {
            return Ok(false);
        }
        definition.permissions.push(permission.clone());
        Ok(true)
    }

    async fn revoke_permission(
        &self,
        role_name: &RoleName,
        permission: &PermissionName,
    ) -> AppResult<bool> {
        let mut roles = self.roles.lock().await;
        let definition = roles
            .iter_mut()
            .find(|definition| definition.role.name() == role_name)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_name}' was not found")))?;
        let before = definition.permissions.len();
        definition.permissions.retain(|granted| granted != permission);
        Ok(definition.permissions.len() != before)
    }
}

#[async_trait]
impl AuditRepository for FakeSecurityStore {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

#[async_trait]
impl AuditLogRepository for FakeSecurityStore {
    async fn list_recent_entries(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>> {
        *self.last_query.lock().await = Some(query);
        Ok(Vec::new())
    }
}

fn role_name(value: &str) -> RoleName {
    RoleName::new(value).unwrap_or_else(|_| panic!("valid role name '{value}'"))
}

fn user(role_id: RoleId, is_active: bool) -> User {
    User::new(
        UserId::new(),
        EmailAddress::new("actor@example.com").unwrap_or_else(|_| panic!("email")),
        "Actor",
        "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA",
        is_active,
        role_id,
    )
    .unwrap_or_else(|_| panic!("valid user"))
}

fn service(store: &Arc<FakeSecurityStore>) -> SecurityAdminService {
    SecurityAdminService::new(
        AuthorizationService::new(store.clone()),
        store.clone(),
        store.clone(),
        store.clone(),
    )
}

fn create_input(name: &str, permissions: &[CatalogPermission]) -> CreateRoleInput {
    CreateRoleInput {
        name: role_name(name),
        display_name: "Warehouse staff".to_owned(),
        description: Some("  ".to_owned()),
        permissions: permissions.iter().map(CatalogPermission::name).collect(),
    }
}

#[tokio::test]
async fn create_role_requires_roles_manage() {
    let store = Arc::new(FakeSecurityStore::default());
    let viewer = store
        .seed_role("auditor", RoleKind::Standard, &[CatalogPermission::RolesView])
        .await;
    let service = service(&store);

    let result = service
        .create_role(
            &user(viewer, true),
            create_input("staff", &[CatalogPermission::InventoryView]),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(store.events().await.is_empty());
}

#[tokio::test]
async fn create_role_deduplicates_grants_and_emits_audit_event() {
    let store = Arc::new(FakeSecurityStore::default());
    let admin = store
        .seed_role(SUPER_ADMIN_ROLE_NAME, RoleKind::SuperAdmin, &[])
        .await;
    let service = service(&store);

    let created = service
        .create_role(
            &user(admin, true),
            create_input(
                "staff",
                &[
                    CatalogPermission::OrdersView,
                    CatalogPermission::InventoryView,
                    CatalogPermission::OrdersView,
                ],
            ),
        )
        .await
        .unwrap_or_else(|_| panic!("role created"));

    let names: Vec<&str> = created
        .permissions
        .iter()
        .map(PermissionName::as_str)
        .collect();
    assert_eq!(names, vec!["inventory.view", "orders.view"]);
    assert_eq!(created.role.description(), None);
    assert_eq!(store.events().await, vec![AuditAction::SecurityRoleCreated]);
}

#[tokio::test]
async fn inactive_actor_is_rejected_as_account_inactive() {
    let store = Arc::new(FakeSecurityStore::default());
    let admin = store
        .seed_role(SUPER_ADMIN_ROLE_NAME, RoleKind::SuperAdmin, &[])
        .await;

    let result = service(&store).list_roles(&user(admin, false)).await;
    assert!(matches!(result, Err(AppError::AccountInactive(_))));
}

#[tokio::test]
async fn grant_is_idempotent_and_audited_once() {
    let store = Arc::new(FakeSecurityStore::default());
    let admin = store
        .seed_role(SUPER_ADMIN_ROLE_NAME, RoleKind::SuperAdmin, &[])
        .await;
    store
        .seed_role("clerk", RoleKind::Standard, &[CatalogPermission::InventoryView])
        .await;
    let service = service(&store);
    let actor = user(admin, true);
    let bulk_upload = CatalogPermission::InventoryBulkUpload.name();

    let first = service
        .grant_permission(&actor, &role_name("clerk"), &bulk_upload)
        .await;
    let second = service
        .grant_permission(&actor, &role_name("clerk"), &bulk_upload)
        .await;

    assert!(matches!(first, Ok(true)));
    assert!(matches!(second, Ok(false)));
    assert_eq!(
        store.events().await,
        vec![AuditAction::SecurityPermissionGranted]
    );
}

#[tokio::test]
async fn revoke_of_missing_grant_is_not_found() {
    let store = Arc::new(FakeSecurityStore::default());
    let admin = store
        .seed_role(SUPER_ADMIN_ROLE_NAME, RoleKind::SuperAdmin, &[])
        .await;
    store
        .seed_role("clerk", RoleKind::Standard, &[CatalogPermission::InventoryView])
        .await;
    let service = service(&store);
    let actor = user(admin, true);

    let missing = service
        .revoke_permission(&actor, &role_name("clerk"), &CatalogPermission::AuditView.name())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let revoked = service
        .revoke_permission(
            &actor,
            &role_name("clerk"),
            &CatalogPermission::InventoryView.name(),
        )
        .await;
    assert!(revoked.is_ok());
    assert_eq!(
        store.events().await,
        vec![AuditAction::SecurityPermissionRevoked]
    );
}

#[tokio::test]
async fn super_admin_role_grants_cannot_be_changed() {
    let store = Arc::new(FakeSecurityStore::default());
    let admin = store
        .seed_role(SUPER_ADMIN_ROLE_NAME, RoleKind::SuperAdmin, &[])
        .await;

    let result = service(&store)
        .grant_permission(
            &user(admin, true),
            &role_name(SUPER_ADMIN_ROLE_NAME),
            &CatalogPermission::InventoryView.name(),
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn super_admin_role_cannot_be_deactivated_or_deleted() {
    let store = Arc::new(FakeSecurityStore::default());
    let admin = store
        .seed_role(SUPER_ADMIN_ROLE_NAME, RoleKind::SuperAdmin, &[])
        .await;
    let service = service(&store);
    let actor = user(admin, true);

    let deactivate = service
        .update_role(
            &actor,
            &role_name(SUPER_ADMIN_ROLE_NAME),
            UpdateRoleInput {
                display_name: "Super admin".to_owned(),
                description: None,
                is_active: false,
            },
        )
        .await;
    assert!(matches!(deactivate, Err(AppError::Conflict(_))));

    let delete = service
        .delete_role(&actor, &role_name(SUPER_ADMIN_ROLE_NAME))
        .await;
    assert!(matches!(delete, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn delete_role_is_refused_while_users_hold_it() {
    let store = Arc::new(FakeSecurityStore::default());
    let admin = store
        .seed_role(SUPER_ADMIN_ROLE_NAME, RoleKind::SuperAdmin, &[])
        .await;
    store
        .seed_role("clerk", RoleKind::Standard, &[CatalogPermission::InventoryView])
        .await;

    let result = service(&store)
        .delete_role(&user(admin, true), &role_name("clerk"))
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn find_role_reports_unknown_role_as_not_found() {
    let store = Arc::new(FakeSecurityStore::default());
    let viewer = store
        .seed_role("auditor", RoleKind::Standard, &[CatalogPermission::RolesView])
        .await;

    let result = service(&store)
        .find_role(&user(viewer, true), &role_name("ghost"))
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn audit_log_limit_is_clamped() {
    let store = Arc::new(FakeSecurityStore::default());
    let auditor = store
        .seed_role("auditor", RoleKind::Standard, &[CatalogPermission::AuditView])
        .await;

    let result = service(&store)
        .list_audit_log(
            &user(auditor, true),
            AuditLogQuery {
                limit: 10_000,
                offset: 0,
                action: None,
                subject: None,
            },
        )
        .await;

    assert!(result.is_ok());
    let query = store.last_query.lock().await.clone();
    assert_eq!(query.map(|query| query.limit), Some(crate::AUDIT_LOG_MAX_LIMIT));
}

#[tokio::test]
async fn list_permissions_returns_catalog_to_viewers() {
    let store = Arc::new(FakeSecurityStore::default());
    let viewer = store
        .seed_role("auditor", RoleKind::Standard, &[CatalogPermission::RolesView])
        .await;

    let permissions = service(&store)
        .list_permissions(&user(viewer, true))
        .await
        .unwrap_or_default();
    assert_eq!(permissions.len(), CatalogPermission::all().len());
}
