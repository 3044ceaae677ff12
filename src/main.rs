use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json,
};
use serde_json::json;
use std::{
    fs,
    path::PathBuf,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use car_price_predictor::{
    encode::BRAND_CODES,
    model::TorchModel,
    predict::{format_error, format_price, run_prediction},
    types::{CarInput, PredictionOut},
};

// ---------- Server state ----------

#[derive(Clone)]
struct AppState {
    model: Arc<TorchModel>,
    page: Arc<String>,
}

// ---------- Handlers ----------

async fn index(State(state): State<AppState>) -> Html<String> {
    Html((*state.page).clone())
}

async fn predict(
    State(state): State<AppState>,
    Json(input): Json<CarInput>,
) -> Result<Json<PredictionOut>, (StatusCode, Json<serde_json::Value>)> {
    match run_prediction(state.model.as_ref(), &input) {
        Ok(price) => {
            tracing::info!(
                "predicted {:.2} for brand={} year={} km={}",
                price,
                input.brand,
                input.year,
                input.km_driven
            );
            Ok(Json(PredictionOut {
                price,
                message: format_price(price),
            }))
        }
        Err(e) => {
            tracing::warn!("prediction failed: {}", e);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": format_error(&e) })),
            ))
        }
    }
}

// ---------- Stylesheet resolution ----------

// Optional external stylesheet; looked up next to the working directory and
// the binary. Missing is fine, default presentation applies.
fn resolve_style_path() -> Option<PathBuf> {
    let mut candidates = vec![
        PathBuf::from("style.css"),
        PathBuf::from("assets/style.css"),
    ];
    if let Ok(mut exe) = std::env::current_exe() {
        exe.pop();
        exe.push("style.css");
        candidates.push(exe);
    }
    candidates.into_iter().find(|c| c.exists())
}

fn load_stylesheet() -> String {
    match resolve_style_path().and_then(|p| fs::read_to_string(&p).ok()) {
        Some(css) => css,
        None => {
            tracing::warn!("style.css not found; default styling applied");
            String::new()
        }
    }
}

// ---------- Page rendering ----------

const PAGE_TEMPLATE: &str = include_str!("page.html");

// Year granularity only; the 365.25-day average keeps this exact through
// this century.
fn current_year() -> i32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    1970 + (secs / 31_557_600) as i32
}

fn render_page(stylesheet: &str) -> String {
    let mut brands: Vec<&str> = BRAND_CODES.iter().map(|(name, _)| *name).collect();
    brands.sort_unstable();
    let options: String = brands
        .iter()
        .map(|b| format!("<option value=\"{b}\">{b}</option>"))
        .collect();

    PAGE_TEMPLATE
        .replace("/*STYLE*/", stylesheet)
        .replace("<!--BRANDS-->", &options)
        .replace("MAX_YEAR", &current_year().to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let model_path = std::env::var("MODEL_PATH").expect("MODEL_PATH not set");
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let model = TorchModel::load(&model_path)?;
    tracing::info!("loaded model from {}; warmup forward ok", model_path);

    let page = render_page(&load_stylesheet());

    let state = AppState {
        model: Arc::new(model),
        page: Arc::new(page),
    };

    let app = axum::Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .with_state(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
