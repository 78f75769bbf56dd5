#![allow(clippy::unwrap_used, clippy::expect_used, clippy::must_use_candidate)]

//! In-memory port fakes and fixtures for unit tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use catequista_scope_sdk::{
    IdentityDirectory, ProfileLinkResolver, ScopeError, Turma, TurmaReader, TurmaStatus,
};
use parking_lot::Mutex;
use portal_security::{Identity, IdentityId, ProfileId};

use crate::domain::hooks::ScopePorts;
use crate::domain::ports::{NoticePublisher, SyncNotice};

/// Profiles, identities and classes held in memory.
///
/// Counts lookups so tests can assert that privileged paths never read.
#[derive(Default)]
pub struct InMemoryDirectory {
    links: Mutex<Vec<(ProfileId, IdentityId)>>,
    identities: Mutex<BTreeMap<IdentityId, BTreeSet<String>>>,
    turmas: Mutex<BTreeMap<String, Turma>>,
    failing: Mutex<bool>,
    profile_lookups: AtomicUsize,
    turma_lookups: AtomicUsize,
}

impl InMemoryDirectory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn link(&self, profile: &str, identity: &str) {
        self.links
            .lock()
            .push((ProfileId::new(profile), IdentityId::new(identity)));
    }

    pub fn add_identity(&self, identity: &str, roles: &[&str]) {
        self.identities.lock().insert(
            IdentityId::new(identity),
            roles.iter().map(|r| (*r).to_owned()).collect(),
        );
    }

    pub fn add_turma(&self, turma: Turma) {
        self.turmas.lock().insert(turma.id.clone(), turma);
    }

    /// Make every port call fail with a storage error.
    pub fn fail_all(&self) {
        *self.failing.lock() = true;
    }

    pub fn roles(&self, identity: &str) -> Option<BTreeSet<String>> {
        self.identities.lock().get(&IdentityId::new(identity)).cloned()
    }

    pub fn profile_lookups(&self) -> usize {
        self.profile_lookups.load(Ordering::SeqCst)
    }

    pub fn turma_lookups(&self) -> usize {
        self.turma_lookups.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ScopeError> {
        if *self.failing.lock() {
            return Err(ScopeError::Storage("backend unavailable".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileLinkResolver for InMemoryDirectory {
    async fn find_profile_for_identity(
        &self,
        identity: &IdentityId,
    ) -> Result<Option<ProfileId>, ScopeError> {
        self.profile_lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .links
            .lock()
            .iter()
            .filter(|(_, linked)| linked == identity)
            .map(|(profile, _)| profile.clone())
            .min())
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryDirectory {
    async fn roles_of(&self, identity: &IdentityId) -> Result<Option<BTreeSet<String>>, ScopeError> {
        self.check()?;
        Ok(self.identities.lock().get(identity).cloned())
    }

    async fn add_role(&self, identity: &IdentityId, role: &str) -> Result<(), ScopeError> {
        self.check()?;
        let mut identities = self.identities.lock();
        let roles = identities
            .get_mut(identity)
            .ok_or_else(|| ScopeError::Storage(format!("unknown identity {identity}")))?;
        roles.insert(role.to_owned());
        Ok(())
    }
}

#[async_trait]
impl TurmaReader for InMemoryDirectory {
    async fn get_turma(&self, id: &str) -> Result<Option<Turma>, ScopeError> {
        self.turma_lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.turmas.lock().get(id).cloned())
    }
}

/// Captures published notices.
#[derive(Default)]
pub struct RecordingNotices {
    notices: Mutex<Vec<SyncNotice>>,
}

impl RecordingNotices {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn taken(&self) -> Vec<SyncNotice> {
        self.notices.lock().clone()
    }
}

impl NoticePublisher for RecordingNotices {
    fn publish(&self, notice: &SyncNotice) {
        self.notices.lock().push(notice.clone());
    }
}

pub fn ports(dir: &Arc<InMemoryDirectory>) -> ScopePorts {
    ScopePorts {
        profiles: dir.clone(),
        identities: dir.clone(),
        turmas: dir.clone(),
    }
}

pub fn turma(id: &str, primary: Option<&str>, secondary: Option<&str>, status: &str) -> Turma {
    Turma {
        id: id.to_owned(),
        owner_primary: primary.map(ProfileId::new),
        owner_secondary: secondary.map(ProfileId::new),
        status: TurmaStatus::from_label(status),
    }
}

pub fn catequista(id: &str) -> Identity {
    Identity::builder().id(id).role("Catequista").build()
}

pub fn coordinator(id: &str) -> Identity {
    Identity::builder().id(id).role("System Manager").build()
}

/// Fresh in-memory `SQLite` database with the module's tables migrated.
pub async fn inmem_repo() -> crate::infra::storage::OrmScopeRepository {
    let db = portal_db::connect_db(
        "sqlite::memory:",
        portal_db::ConnectOpts {
            max_conns: Some(1),
            min_conns: Some(1),
            ..portal_db::ConnectOpts::default()
        },
    )
    .await
    .expect("connect to in-memory sqlite");

    let repo = crate::infra::storage::OrmScopeRepository::new(db);
    repo.migrate().await.expect("migrate");
    repo
}
