use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    serve, Form, Router,
};
use minijinja::Environment;
use serde::Deserialize;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::client::AskClient;
use crate::panel::{Panel, ASK_LABEL};
use crate::ui::{ANSWER_TITLE, INPUT_LABEL, TITLE};

const INDEX_TEMPLATE: &str = "index.html";

// Shared application state
#[derive(Clone)]
struct AppState {
    templates: Arc<Environment<'static>>,
    client: AskClient,
}

#[derive(Debug, Deserialize)]
struct AskForm {
    #[serde(default)]
    question: String,
}

type HtmlResult = Result<Html<String>, (StatusCode, Html<String>)>;

fn create_minijinja_env() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))
        .context("Failed to load index template")?;
    Ok(env)
}

fn render_panel(state: &AppState, panel: &Panel) -> HtmlResult {
    state
        .templates
        .get_template(INDEX_TEMPLATE)
        .and_then(|tmpl| {
            tmpl.render(minijinja::context! {
                title => TITLE,
                input_label => INPUT_LABEL,
                answer_title => ANSWER_TITLE,
                ask_label => ASK_LABEL,
                question => panel.question(),
                has_answer => !panel.answer().is_empty(),
                paragraphs => panel.paragraphs(),
            })
        })
        .map(Html)
        .map_err(|e| {
            error!("Failed to render template: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("Internal Server Error: {}", e)),
            )
        })
}

async fn index_handler(State(state): State<AppState>) -> HtmlResult {
    render_panel(&state, &Panel::new())
}

// Each request gets a fresh panel; the browser keeps the question in the form.
async fn ask_handler(State(state): State<AppState>, Form(form): Form<AskForm>) -> HtmlResult {
    let mut panel = Panel::new();
    panel.set_question(form.question);
    panel.ask(&state.client).await;
    render_panel(&state, &panel)
}

pub fn router(client: AskClient) -> Result<Router> {
    let templates = create_minijinja_env().context("Failed to initialize template engine")?;
    let state = AppState {
        templates: Arc::new(templates),
        client,
    };

    Ok(Router::new()
        .route("/", get(index_handler))
        .route("/ask", post(ask_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http()))
}

pub async fn start_web_server(port: u16, client: AskClient) -> Result<()> {
    let app = router(client)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind to address {}", addr))?;

    serve(listener, app.into_make_service())
        .await
        .context("Web server failed")?;

    Ok(())
}
