use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use locator_registry::{HttpRegistry, RegistryConfig};

/// One multipart field received by the fake registry.
#[derive(Debug, Clone)]
pub struct ReceivedField {
    pub name: String,
    pub file_name: Option<String>,
    pub text: String,
    pub len: usize,
}

/// Requests captured by the fake registry.
#[derive(Debug, Default)]
pub struct Captured {
    pub search_params: Vec<HashMap<String, String>>,
    pub tip_fields: Vec<ReceivedField>,
}

pub type SharedCapture = Arc<Mutex<Captured>>;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Client pointed at `base_url` with a short timeout.
pub fn client(base_url: &str, timeout: Duration) -> HttpRegistry {
    HttpRegistry::new(&RegistryConfig {
        base_url: base_url.to_string(),
        timeout,
        page_size: 10,
    })
    .unwrap()
}

pub fn person_json(id: i64, name: &str, located_on: Option<&str>) -> Value {
    json!({
        "id": id,
        "nome": name,
        "idade": 30,
        "sexo": "FEMININO",
        "vivo": true,
        "urlFoto": null,
        "ultimaOcorrencia": {
            "ocoId": id + 1000,
            "dtDesaparecimento": "2024-01-15T00:00:00",
            "dataLocalizacao": located_on,
            "encontradoVivo": located_on.is_some(),
            "localDesaparecimentoConcat": "Cuiabá/MT",
            "ocorrenciaEntrevDesapDTO": null,
            "listaCartaz": []
        }
    })
}

/// A registry that behaves like the real one for a small data set.
///
/// - `GET /v1/pessoas/aberto/filtro` filters by `nome` and pages with
///   `pagina`/`porPagina`.
/// - `GET /v1/pessoas/{id}` knows ids 1..=3, answers 500 for `boom` and
///   404 otherwise.
/// - `POST /v1/ocorrencias/informacoes-desaparecido` records multipart fields.
pub fn registry_router(capture: SharedCapture) -> Router {
    Router::new()
        .route("/v1/pessoas/aberto/filtro", get(search))
        .route("/v1/pessoas/{id}", get(person))
        .route("/v1/ocorrencias/informacoes-desaparecido", post(tip))
        .with_state(capture)
}

fn people() -> Vec<Value> {
    vec![
        person_json(1, "Maria Silva", None),
        person_json(2, "João Souza", Some("2024-02-01")),
        person_json(3, "Ana Maria Costa", None),
    ]
}

async fn search(
    State(capture): State<SharedCapture>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    capture.lock().unwrap().search_params.push(params.clone());

    let page: usize = params.get("pagina").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size: usize = params
        .get("porPagina")
        .and_then(|p| p.parse().ok())
        .unwrap_or(10);
    let name = params.get("nome").map(|n| n.to_lowercase());

    let matching: Vec<Value> = people()
        .into_iter()
        .filter(|p| match &name {
            Some(n) => p["nome"].as_str().unwrap().to_lowercase().contains(n),
            None => true,
        })
        .collect();
    let total = matching.len();
    let content: Vec<Value> = matching.into_iter().skip(page * size).take(size).collect();

    Json(json!({
        "content": content,
        "totalElements": total,
        "totalPages": total.div_ceil(size),
        "number": page,
        "size": size,
    }))
}

async fn person(Path(id): Path<String>) -> impl IntoResponse {
    match id.as_str() {
        "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "database offline").into_response(),
        _ => match people().into_iter().find(|p| p["id"].to_string() == id) {
            Some(p) => Json(p).into_response(),
            None => (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))).into_response(),
        },
    }
}

async fn tip(State(capture): State<SharedCapture>, mut multipart: Multipart) -> StatusCode {
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.unwrap_or_default();
        fields.push(ReceivedField {
            name,
            file_name,
            text: String::from_utf8_lossy(&bytes).to_string(),
            len: bytes.len(),
        });
    }
    capture.lock().unwrap().tip_fields.extend(fields);
    StatusCode::CREATED
}
