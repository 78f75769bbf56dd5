use serde::Deserialize;

/// Name of the restricted teacher role.
pub const DEFAULT_RESTRICTED_ROLE: &str = "Catequista";

/// Configuration for the catequista scope module.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScopeConfig {
    /// Role whose holders are narrowed to their own classes.
    pub restricted_role: String,

    /// Baseline entity permissions the installer grants to the role.
    pub permissions: Vec<EntityPermissionConfig>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            restricted_role: DEFAULT_RESTRICTED_ROLE.to_owned(),
            permissions: vec![
                EntityPermissionConfig::read_write("Turma"),
                EntityPermissionConfig::read_write("Catecumeno"),
                EntityPermissionConfig::read_write("Turma Catecumenos"),
            ],
        }
    }
}

/// One role-permission row: which operations the role may perform on an
/// entity type. Row scoping is applied on top of these.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct EntityPermissionConfig {
    pub entity: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub write: bool,
    #[serde(default)]
    pub create: bool,
    #[serde(default)]
    pub delete: bool,
}

impl EntityPermissionConfig {
    /// Read and write, no create or delete.
    #[must_use]
    pub fn read_write(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            read: true,
            write: true,
            create: false,
            delete: false,
        }
    }
}
