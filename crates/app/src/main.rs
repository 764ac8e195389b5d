//! `locator-app` -- resolves one route against the registry and prints it.
//!
//! ```text
//! locator-app '/?nome=maria&status=DESAPARECIDO&pagina=2'
//! locator-app /person/42
//! ```
//!
//! # Environment variables
//!
//! | Variable                | Default                       | Description                              |
//! |-------------------------|-------------------------------|------------------------------------------|
//! | `REGISTRY_BASE_URL`     | `https://abitus-api.geia.vip` | Registry root; `static:` uses sample data |
//! | `REGISTRY_TIMEOUT_SECS` | `15`                          | Per-request timeout                      |
//! | `REGISTRY_PAGE_SIZE`    | `10`                          | Records per list page                    |

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use locator_registry::{HttpRegistry, Registry, RegistryConfig, StaticRegistry};
use locator_views::{render_detail, render_list, DetailController, ListController, Route};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "locator_app=info,locator_registry=info,locator_views=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = RegistryConfig::from_env().context("Invalid registry configuration")?;
    let registry: Arc<dyn Registry> = if config.is_static() {
        Arc::new(StaticRegistry::with_sample_data())
    } else {
        Arc::new(HttpRegistry::new(&config)?)
    };

    let path = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    let route = Route::parse(&path)?;

    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout.as_secs(),
        route = ?route,
        "Starting locator-app",
    );

    let output = match &route {
        Route::List { .. } => {
            let query = route
                .search_query(config.page_size)
                .context("List route without a query")?;
            let mut list = ListController::with_query(query);
            let request = list.refresh();
            list.load(registry.as_ref(), request).await;
            render_list(&list)
        }
        Route::Detail { id } => {
            let mut detail = DetailController::new();
            if let Some(request) = detail.set_person_id(id) {
                detail.load(registry.as_ref(), request).await;
            }
            render_detail(&detail, chrono::Local::now().date_naive())
        }
        Route::NotFound => {
            tracing::warn!(path = %path, "No view for route");
            "Página não encontrada.\n".to_string()
        }
    };

    print!("{output}");
    Ok(())
}
