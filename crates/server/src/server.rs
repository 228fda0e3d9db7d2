use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};

use std::{future::Future, sync::Arc};

use crate::{ServerError, balances, expenses, identity::IdentityProvider, user};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl ServerState {
    pub fn new(engine: Engine, identity: impl IdentityProvider + 'static) -> Self {
        Self {
            engine: Arc::new(engine),
            identity: Arc::new(identity),
        }
    }
}

async fn identify(
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let identity = state.identity.identify(request.headers())?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

async fn liveness() -> Json<&'static str> {
    Json("Splitledger API is running")
}

pub fn router(state: ServerState) -> Router {
    let public = Router::new()
        .route("/users/signup", post(user::signup))
        .route("/users/login", post(user::login));

    let identified = Router::new()
        .route(
            "/users/profile",
            get(user::profile).put(user::update_profile),
        )
        .route("/users/account", axum::routing::delete(user::delete_account))
        .route("/expenses", post(expenses::add).get(expenses::list))
        .route(
            "/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .route("/balances", get(balances::get))
        .route_layer(middleware::from_fn_with_state(state.clone(), identify));

    Router::new()
        .route("/", get(liveness))
        .nest("/api", public.merge(identified))
        .with_state(state)
}

pub async fn run(state: ServerState, addr: &str) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    run_with_listener(state, listener, shutdown_signal()).await
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
