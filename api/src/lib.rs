pub mod admin;
pub mod api_key;
pub mod auth;
pub mod config;
mod crud_helpers;
pub mod error;
pub mod obfuscate_errors;
pub mod panic_handler;
pub mod routes;
pub mod shared_state;
pub mod tracing_config;
pub mod validation;

use axum::{routing::IntoMakeService, Router};
use base64::{engine::general_purpose::STANDARD, Engine};
use hyper::server::conn::AddrIncoming;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tower::ServiceBuilder;
use tower_cookies::CookieManagerLayer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::{event, Level};

use sports_hub_db::PoolExt;

pub use crate::error::Error;
use crate::{
    auth::{auth_layer, session_manager},
    obfuscate_errors::ObfuscateErrorLayer,
    shared_state::InnerState,
};

pub struct Server {
    pub host: String,
    pub port: u16,
    pub server: axum::Server<AddrIncoming, IntoMakeService<Router>>,
}

impl Server {
    pub async fn run(self) -> Result<(), Error> {
        self.server.await?;
        Ok(())
    }
}

pub async fn create_server(config: config::Config) -> Result<Server, anyhow::Error> {
    let production = config.production();
    let db = sports_hub_db::connect(config.database_url.as_str(), config.database_pool_size)?;

    db.interact(|conn| sports_hub_db::run_migrations(conn).map_err(Error::Generic))
        .await?;

    let cookie_key = STANDARD.decode(config.cookie_key.as_bytes())?;
    let sessions = session_manager(db.clone(), config.session_cookie_name.clone(), &cookie_key)?;

    let state = Arc::new(InnerState {
        production,
        db: db.clone(),
        sessions: sessions.clone(),
        templates: admin::Templates::new()?,
    });

    let app = routes::configure()
        .merge(admin::configure())
        .layer(auth_layer(db, sessions))
        .with_state(state)
        .layer(
            // Global middlewares
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(move |err| {
                    panic_handler::handle_panic(production, err)
                }))
                .layer(ObfuscateErrorLayer::new(production))
                .compression()
                .layer(CookieManagerLayer::new())
                .set_x_request_id(MakeRequestUuid)
                .propagate_x_request_id()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::INFO)),
                )
                .into_inner(),
        );

    let bind_ip: IpAddr = config.host.parse()?;
    let addr = SocketAddr::from((bind_ip, config.port));
    let builder = axum::Server::try_bind(&addr)?;
    let server = builder.serve(app.into_make_service());

    // Port 0 binds a random port, so report the one we actually got.
    let port = server.local_addr().port();
    event!(Level::INFO, "Listening on {}:{}", config.host, port);

    Ok(Server {
        host: config.host,
        port,
        server,
    })
}
