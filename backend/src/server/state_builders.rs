//! Builds handler state from the configured store.

use std::sync::Arc;

use tracing::info;
use veggie_patch::domain::RecipeCatalogueService;
use veggie_patch::domain::ports::{CategoryRepository, RecipeRepository};
use veggie_patch::inbound::http::state::HttpState;
use veggie_patch::outbound::memory::InMemoryRecipeStore;
use veggie_patch::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselRecipeRepository,
};

fn state_for<R, C>(recipes: Arc<R>, categories: Arc<C>) -> HttpState
where
    R: RecipeRepository + 'static,
    C: CategoryRepository + 'static,
{
    let service = Arc::new(RecipeCatalogueService::new(recipes, categories));
    HttpState::new(service.clone(), service)
}

/// PostgreSQL-backed state when a pool is configured, otherwise a seeded
/// in-memory store that lives as long as the process.
pub(super) fn build_http_state(db_pool: Option<&DbPool>) -> HttpState {
    match db_pool {
        Some(pool) => {
            info!("serving recipes from PostgreSQL");
            state_for(
                Arc::new(DieselRecipeRepository::new(pool.clone())),
                Arc::new(DieselCategoryRepository::new(pool.clone())),
            )
        }
        None => {
            info!("no database configured; serving recipes from memory");
            let store = Arc::new(InMemoryRecipeStore::new());
            state_for(store.clone(), store)
        }
    }
}
