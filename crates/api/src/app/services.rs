use std::sync::Arc;

use beltline_infra::{
    CatalogReader, CheckoutRunner, InMemoryCatalog, InMemoryOrderStore, InMemorySessionStore,
    OrderStore, SessionStore, StoreError, postgres, seed,
};

use crate::config::{AdminCredentials, AppConfig};

/// Store handles and the checkout runner shared by all handlers.
pub struct AppServices {
    pub catalog: Arc<dyn CatalogReader>,
    pub orders: Arc<dyn OrderStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub checkout: CheckoutRunner,
    pub admin: AdminCredentials,
}

/// Wire stores according to config: Postgres when `DATABASE_URL` is set,
/// in-memory (with the demo catalog) otherwise.
pub async fn build_services(config: &AppConfig) -> Result<AppServices, StoreError> {
    let (catalog, orders, sessions): (
        Arc<dyn CatalogReader>,
        Arc<dyn OrderStore>,
        Arc<dyn SessionStore>,
    ) = match &config.database_url {
        Some(url) => {
            let pool = postgres::connect(url).await?;
            postgres::migrate(&pool).await?;
            postgres::seed_demo_catalog(&pool).await?;
            tracing::info!("using postgres stores");
            (
                Arc::new(postgres::PostgresCatalog::new(pool.clone())),
                Arc::new(postgres::PostgresOrderStore::new(pool.clone())),
                Arc::new(postgres::PostgresSessionStore::new(pool)),
            )
        }
        None => {
            tracing::info!("DATABASE_URL not set; using in-memory stores with demo catalog");
            (
                Arc::new(InMemoryCatalog::with_products(seed::demo_products())),
                Arc::new(InMemoryOrderStore::new()),
                Arc::new(InMemorySessionStore::new()),
            )
        }
    };

    let checkout = CheckoutRunner::new(catalog.clone(), orders.clone(), sessions.clone());

    Ok(AppServices {
        catalog,
        orders,
        sessions,
        checkout,
        admin: config.admin.clone(),
    })
}
