use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::ports::{RepositoryError, RoleRepository};
use crate::domain::search::SearchQuery;
use crate::domain::{Role, RoleSort};

use super::{MemoryStore, SortKey, Tables, ensure_unique, sorted_page};

const NAME_CONSTRAINT: &str = "roles_name_key";

/// [`RoleRepository`] over a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryRoleRepository {
    store: MemoryStore,
}

impl MemoryRoleRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn name_taken(tables: &Tables, role: &Role) -> bool {
    tables
        .roles
        .values()
        .any(|stored| stored.id != role.id && stored.name == role.name)
}

#[async_trait]
impl RoleRepository for MemoryRoleRepository {
    async fn search(&self, query: &SearchQuery<RoleSort>) -> Result<Page<Role>, RepositoryError> {
        let matches: Vec<Role> = self.store.with(|tables| {
            tables
                .roles
                .values()
                .filter(|role| query.matches_any(&[role.name.as_str(), role.description.as_str()]))
                .cloned()
                .collect()
        });
        Ok(sorted_page(
            matches,
            query.direction(),
            query.page(),
            |role| match query.sort() {
                RoleSort::Id => SortKey::Id(role.id),
                RoleSort::Name => SortKey::Text(&role.name),
                RoleSort::Description => SortKey::Text(&role.description),
            },
            |role| role.id,
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, RepositoryError> {
        Ok(self.store.with(|tables| tables.roles.get(&id).cloned()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError> {
        Ok(self
            .store
            .with(|tables| tables.roles.values().find(|role| role.name == name).cloned()))
    }

    async fn insert(&self, role: &Role) -> Result<(), RepositoryError> {
        self.store.with(|tables| {
            ensure_unique(tables.roles.contains_key(&role.id), "roles_pkey")?;
            ensure_unique(name_taken(tables, role), NAME_CONSTRAINT)?;
            tables.roles.insert(role.id, role.clone());
            Ok(())
        })
    }

    async fn update(&self, role: &Role) -> Result<bool, RepositoryError> {
        self.store.with(|tables| {
            if !tables.roles.contains_key(&role.id) {
                return Ok(false);
            }
            ensure_unique(name_taken(tables, role), NAME_CONSTRAINT)?;
            tables.roles.insert(role.id, role.clone());
            Ok(true)
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.store.with(|tables| tables.roles.remove(&id).is_some()))
    }
}
