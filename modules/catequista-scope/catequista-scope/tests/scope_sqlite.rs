#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end scoping against an in-memory `SQLite` database.
//!
//! Seeds one parish: two teachers (Ana, Rui), an unlinked teacher account,
//! a coordinator, three classes and a handful of students.

use std::sync::Arc;

use catequista_scope::infra::storage::entity::{
    catecumeno, catequista, identity, identity_role, turma,
};
use catequista_scope::{
    OrmScopeRepository, ScopeConfig, ScopeHooks, SyncOutcome, TracingNoticePublisher,
};
use catequista_scope_sdk::{
    DocumentRef, EntityKind, IdentityDirectory, Operation, PermissionDecision, Profile, SaveEvent,
    TurmaReader,
};
use portal_db::{ConnectOpts, connect_db};
use portal_security::{Identity, IdentityId, ProfileId};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

async fn setup() -> (Arc<OrmScopeRepository>, ScopeHooks) {
    let db = connect_db(
        "sqlite::memory:",
        ConnectOpts {
            max_conns: Some(1),
            min_conns: Some(1),
            ..ConnectOpts::default()
        },
    )
    .await
    .expect("connect");

    let repo = Arc::new(OrmScopeRepository::new(db));
    repo.migrate().await.expect("migrate");
    seed(repo.connection()).await;

    let hooks = ScopeHooks::new(
        &ScopeConfig::default(),
        repo.ports(),
        Arc::new(TracingNoticePublisher),
    );
    (repo, hooks)
}

async fn add_profile(db: &DatabaseConnection, name: &str, user: Option<&str>) {
    catequista::Entity::insert(catequista::ActiveModel {
        name: Set(name.to_owned()),
        user_id: Set(user.map(str::to_owned)),
    })
    .exec_without_returning(db)
    .await
    .unwrap();
}

async fn add_identity(db: &DatabaseConnection, id: &str, roles: &[&str]) {
    identity::Entity::insert(identity::ActiveModel {
        id: Set(id.to_owned()),
        full_name: Set(None),
        enabled: Set(true),
    })
    .exec_without_returning(db)
    .await
    .unwrap();
    for role in roles {
        identity_role::Entity::insert(identity_role::ActiveModel {
            identity_id: Set(id.to_owned()),
            role: Set((*role).to_owned()),
        })
        .exec_without_returning(db)
        .await
        .unwrap();
    }
}

async fn add_turma(
    db: &DatabaseConnection,
    name: &str,
    primary: Option<&str>,
    secondary: Option<&str>,
    status: &str,
) {
    turma::Entity::insert(turma::ActiveModel {
        name: Set(name.to_owned()),
        fase: Set(Some("1.o Ano".to_owned())),
        catequista: Set(primary.map(str::to_owned)),
        catequista_adj: Set(secondary.map(str::to_owned)),
        status: Set(status.to_owned()),
    })
    .exec_without_returning(db)
    .await
    .unwrap();
}

async fn add_student(db: &DatabaseConnection, name: &str, class: &str) {
    catecumeno::Entity::insert(catecumeno::ActiveModel {
        name: Set(name.to_owned()),
        fase: Set(None),
        turma: Set(Some(class.to_owned())),
        status: Set(Some("Activo".to_owned())),
    })
    .exec_without_returning(db)
    .await
    .unwrap();
}

async fn seed(db: &DatabaseConnection) {
    add_profile(db, "Ana Sousa", Some("ana@paroquia.pt")).await;
    add_profile(db, "Rui Lopes", Some("rui@paroquia.pt")).await;
    add_profile(db, "x' OR '1'='1", None).await;

    add_identity(db, "ana@paroquia.pt", &["Catequista"]).await;
    add_identity(db, "rui@paroquia.pt", &["Catequista"]).await;
    add_identity(db, "bob@paroquia.pt", &["Catequista"]).await;
    add_identity(db, "admin@paroquia.pt", &["System Manager"]).await;

    // Ana leads T1 (active) and T3 (closed), assists in T2.
    add_turma(db, "T1", Some("Ana Sousa"), None, "Activo").await;
    add_turma(db, "T2", Some("Rui Lopes"), Some("Ana Sousa"), "Activo").await;
    add_turma(db, "T3", Some("Ana Sousa"), None, "Inactivo").await;
    add_turma(db, "T4", Some("Rui Lopes"), None, "Activo").await;

    add_student(db, "C1", "T1").await;
    add_student(db, "C2", "T2").await;
    add_student(db, "C3", "T3").await;
    add_student(db, "C4", "T4").await;
    add_student(db, "C5", "T9").await;
}

fn teacher(id: &str) -> Identity {
    Identity::builder().id(id).role("Catequista").build()
}

fn names<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|i| id(i).to_owned()).collect()
}

#[tokio::test]
async fn coordinator_sees_everything() {
    let (repo, hooks) = setup().await;
    let admin = Identity::builder().id("admin@paroquia.pt").role("System Manager").build();

    let pred = hooks.list_filter(EntityKind::Turma, &admin).await;
    assert_eq!(repo.list_turmas(&pred, false).await.unwrap().len(), 4);

    let pred = hooks.list_filter(EntityKind::Catecumeno, &admin).await;
    assert_eq!(repo.list_catecumenos(&pred).await.unwrap().len(), 5);
}

#[tokio::test]
async fn teacher_sees_classes_from_either_slot_regardless_of_status() {
    let (repo, hooks) = setup().await;
    let pred = hooks.list_filter(EntityKind::Turma, &teacher("ana@paroquia.pt")).await;

    let all = repo.list_turmas(&pred, false).await.unwrap();
    assert_eq!(names(&all, |t| t.id.as_str()), ["T1", "T2", "T3"]);

    let active = repo.list_turmas(&pred, true).await.unwrap();
    assert_eq!(names(&active, |t| t.id.as_str()), ["T1", "T2"]);
}

#[tokio::test]
async fn teacher_sees_students_of_active_owned_classes_only() {
    let (repo, hooks) = setup().await;
    let pred = hooks
        .list_filter(EntityKind::Catecumeno, &teacher("ana@paroquia.pt"))
        .await;

    let students = repo.list_catecumenos(&pred).await.unwrap();
    assert_eq!(names(&students, |c| c.id.as_str()), ["C1", "C2"]);
}

#[tokio::test]
async fn unlinked_teacher_sees_nothing() {
    let (repo, hooks) = setup().await;
    let bob = teacher("bob@paroquia.pt");

    let pred = hooks.list_filter(EntityKind::Turma, &bob).await;
    assert!(repo.list_turmas(&pred, false).await.unwrap().is_empty());

    let pred = hooks.list_filter(EntityKind::Catecumeno, &bob).await;
    assert!(repo.list_catecumenos(&pred).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_and_document_paths_agree() {
    let (repo, hooks) = setup().await;
    let everything = catequista_scope::build_owning_filter(&portal_security::AccessScope::Unrestricted);

    for user in ["ana@paroquia.pt", "rui@paroquia.pt", "bob@paroquia.pt"] {
        let who = teacher(user);

        let pred = hooks.list_filter(EntityKind::Turma, &who).await;
        let listed = names(&repo.list_turmas(&pred, false).await.unwrap(), |t| t.id.as_str());
        for t in repo.list_turmas(&everything, false).await.unwrap() {
            let decision = hooks.has_permission(DocumentRef::Turma(&t), Operation::Read, &who).await;
            assert_eq!(
                listed.contains(&t.id),
                decision == PermissionDecision::Allow,
                "{user} / {}",
                t.id
            );
        }

        let pred = hooks.list_filter(EntityKind::Catecumeno, &who).await;
        let listed = names(&repo.list_catecumenos(&pred).await.unwrap(), |c| c.id.as_str());
        for c in repo.list_catecumenos(&everything).await.unwrap() {
            let decision = hooks
                .has_permission(DocumentRef::Catecumeno(&c), Operation::Write, &who)
                .await;
            assert_eq!(
                listed.contains(&c.id),
                decision == PermissionDecision::Allow,
                "{user} / {}",
                c.id
            );
        }
    }
}

#[tokio::test]
async fn hostile_profile_name_is_only_a_value() {
    let (repo, _) = setup().await;
    let scope = portal_security::AccessScope::Restricted(ProfileId::new("x' OR '1'='1"));

    let turmas = repo
        .list_turmas(&catequista_scope::build_owning_filter(&scope), false)
        .await
        .unwrap();
    assert!(turmas.is_empty());

    let students = repo
        .list_catecumenos(&catequista_scope::build_dependent_filter(&scope))
        .await
        .unwrap();
    assert!(students.is_empty());
}

#[tokio::test]
async fn closing_a_class_hides_its_students_on_next_check() {
    let (repo, hooks) = setup().await;
    let ana = teacher("ana@paroquia.pt");
    let c1 = repo.get_catecumeno("C1").await.unwrap().unwrap();

    assert_eq!(
        hooks.has_permission(DocumentRef::Catecumeno(&c1), Operation::Read, &ana).await,
        PermissionDecision::Allow
    );

    turma::Entity::update_many()
        .col_expr(turma::Column::Status, sea_orm::sea_query::Expr::value("Inactivo"))
        .filter(turma::Column::Name.eq("T1"))
        .exec(repo.connection())
        .await
        .unwrap();

    assert_eq!(
        hooks.has_permission(DocumentRef::Catecumeno(&c1), Operation::Read, &ana).await,
        PermissionDecision::Deny
    );
}

#[tokio::test]
async fn profile_save_grants_role_once() {
    let (repo, hooks) = setup().await;
    let db = repo.connection();
    add_identity(db, "eva@paroquia.pt", &[]).await;
    add_profile(db, "Eva Reis", Some("eva@paroquia.pt")).await;

    let profile = Profile {
        id: ProfileId::new("Eva Reis"),
        linked_identity: Some(IdentityId::new("eva@paroquia.pt")),
    };
    assert_eq!(
        hooks.on_document_saved(&profile, SaveEvent::AfterInsert).await,
        Some(SyncOutcome::RoleAssigned)
    );
    assert_eq!(
        hooks.on_document_saved(&profile, SaveEvent::OnUpdate).await,
        Some(SyncOutcome::AlreadyAssigned)
    );

    let grants = identity_role::Entity::find()
        .filter(identity_role::Column::IdentityId.eq("eva@paroquia.pt"))
        .all(db)
        .await
        .unwrap();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].role, "Catequista");

    // With the role in place, Eva is narrowed to her (empty) set of classes.
    let eva = teacher("eva@paroquia.pt");
    let pred = hooks.list_filter(EntityKind::Turma, &eva).await;
    assert!(repo.list_turmas(&pred, false).await.unwrap().is_empty());
}

#[tokio::test]
async fn profile_save_with_unknown_identity_assigns_nothing() {
    let (repo, hooks) = setup().await;
    let profile = Profile {
        id: ProfileId::new("Ghost"),
        linked_identity: Some(IdentityId::new("ghost@paroquia.pt")),
    };

    assert_eq!(
        hooks.on_document_saved(&profile, SaveEvent::OnUpdate).await,
        Some(SyncOutcome::IdentityNotFound)
    );
    let grants = identity_role::Entity::find()
        .filter(identity_role::Column::IdentityId.eq("ghost@paroquia.pt"))
        .all(repo.connection())
        .await
        .unwrap();
    assert!(grants.is_empty());
}

#[tokio::test]
async fn identity_links_to_at_most_one_profile() {
    let (repo, _) = setup().await;

    let duplicate = catequista::Entity::insert(catequista::ActiveModel {
        name: Set("Ana Segunda".to_owned()),
        user_id: Set(Some("ana@paroquia.pt".to_owned())),
    })
    .exec_without_returning(repo.connection())
    .await;

    assert!(duplicate.is_err());
}

#[tokio::test]
async fn empty_profile_name_matches_no_empty_owner_slot() {
    let (repo, hooks) = setup().await;
    let db = repo.connection();
    add_profile(db, "", Some("eva@paroquia.pt")).await;
    add_identity(db, "eva@paroquia.pt", &["Catequista"]).await;
    add_turma(db, "TE", Some(""), None, "Activo").await;
    add_student(db, "CE", "TE").await;
    let eva = teacher("eva@paroquia.pt");

    let pred = hooks.list_filter(EntityKind::Turma, &eva).await;
    assert!(repo.list_turmas(&pred, false).await.unwrap().is_empty());
    let pred = hooks.list_filter(EntityKind::Catecumeno, &eva).await;
    assert!(repo.list_catecumenos(&pred).await.unwrap().is_empty());

    let class = repo.get_turma("TE").await.unwrap().unwrap();
    assert_eq!(
        hooks.has_permission(DocumentRef::Turma(&class), Operation::Read, &eva).await,
        PermissionDecision::Deny
    );
    let student = repo.get_catecumeno("CE").await.unwrap().unwrap();
    assert_eq!(
        hooks.has_permission(DocumentRef::Catecumeno(&student), Operation::Read, &eva).await,
        PermissionDecision::Deny
    );
}

#[tokio::test]
async fn repeated_role_grant_keeps_one_row() {
    let (repo, _) = setup().await;
    add_identity(repo.connection(), "eva@paroquia.pt", &[]).await;
    let eva = IdentityId::new("eva@paroquia.pt");

    repo.add_role(&eva, "Catequista").await.unwrap();
    repo.add_role(&eva, "Catequista").await.unwrap();

    let grants = identity_role::Entity::find()
        .filter(identity_role::Column::IdentityId.eq("eva@paroquia.pt"))
        .all(repo.connection())
        .await
        .unwrap();
    assert_eq!(grants.len(), 1);
    let roles = repo.roles_of(&eva).await.unwrap().unwrap();
    assert!(roles.contains("Catequista"));
}
