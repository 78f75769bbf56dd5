pub mod catecumeno;
pub mod catequista;
pub mod identity;
pub mod identity_role;
pub mod role;
pub mod role_permission;
pub mod turma;
