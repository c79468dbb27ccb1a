mod repositories;
mod roles;

pub use repositories::SecurityAdminRepository;
pub use roles::{CreateRoleInput, RoleDefinition, UpdateRoleInput};
