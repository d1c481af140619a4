//! Network module with deferred startup lifecycle.
//!
//! `new()` creates shared state, `start()` binds the TCP listener, and
//! `serve()` accepts connections until shutdown. The split lets callers
//! learn the bound port (and share the [`Lifecycle`]) before serving.

use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::config::{NetworkConfig, TlsConfig};
use super::error::ApiError;
use super::handlers::{
    amenities, cities, health_handler, liveness_handler, place_amenities, places,
    places_search, readiness_handler, reviews, states, stats_handler, status_handler, users,
    AppState,
};
use super::lifecycle::Lifecycle;
use super::middleware::{build_http_layers, track_in_flight};
use crate::storage::Catalog;

/// Prefix of every resource route.
pub const API_PREFIX: &str = "/api/v1";

pub struct NetworkModule {
    config: NetworkConfig,
    listener: Option<TcpListener>,
    catalog: Arc<Catalog>,
    lifecycle: Arc<Lifecycle>,
}

impl NetworkModule {
    /// Creates the module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig, catalog: Arc<Catalog>) -> Self {
        Self {
            config,
            listener: None,
            catalog,
            lifecycle: Arc::new(Lifecycle::new()),
        }
    }

    /// Shared lifecycle handle; triggering shutdown on it stops `serve()`.
    #[must_use]
    pub fn lifecycle(&self) -> Arc<Lifecycle> {
        Arc::clone(&self.lifecycle)
    }

    /// Assembles the router with all routes and middleware.
    pub fn build_router(&self) -> Router {
        build_router(AppState::new(
            Arc::clone(&self.catalog),
            Arc::clone(&self.lifecycle),
            self.config.clone(),
        ))
    }

    /// Binds the TCP listener and returns the bound port, which differs from
    /// the configured one when port 0 is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g., port in use).
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        let port = listener.local_addr()?.port();

        info!(host = %self.config.host, port, "TCP listener bound");

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves until `shutdown` resolves or the lifecycle is told to shut
    /// down, then waits (bounded by `drain_timeout`) for in-flight requests.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called first, TLS material
    /// cannot be loaded, or the server hits a fatal I/O error.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.build_router();
        let Self {
            config,
            listener,
            lifecycle,
            ..
        } = self;
        let listener = listener.context("start() must be called before serve()")?;

        let signal = {
            let lifecycle = Arc::clone(&lifecycle);
            async move {
                tokio::select! {
                    () = shutdown => {}
                    () = lifecycle.shutdown_requested() => {}
                }
                lifecycle.trigger_shutdown();
            }
        };

        lifecycle.set_ready();

        let closed_gracefully = if let Some(tls) = &config.tls {
            serve_tls(listener, router, tls, config.drain_timeout, signal).await?;
            true
        } else {
            serve_plain(listener, router, &lifecycle, config.drain_timeout, signal).await?
        };

        // Connections left open past the deadline were abandoned; only
        // report what is still running.
        let remaining_wait = if closed_gracefully {
            config.drain_timeout
        } else {
            Duration::ZERO
        };
        drain(&lifecycle, remaining_wait).await;
        Ok(())
    }
}

/// The full application router: health probes at the root, resources under
/// [`API_PREFIX`], JSON 404 for everything else.
pub fn build_router(state: AppState) -> Router {
    let layers = build_http_layers(&state.config);
    let in_flight = from_fn_with_state(Arc::clone(&state.lifecycle), track_in_flight);

    Router::new()
        .route("/health", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .nest(API_PREFIX, api_routes())
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(in_flight)
        .layer(layers)
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(status_handler))
        .route("/stats", get(stats_handler))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{user_id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/states", get(states::list_states).post(states::create_state))
        .route(
            "/states/{state_id}",
            get(states::get_state)
                .put(states::update_state)
                .delete(states::delete_state),
        )
        .route(
            "/states/{state_id}/cities",
            get(cities::list_cities).post(cities::create_city),
        )
        .route(
            "/cities/{city_id}",
            get(cities::get_city)
                .put(cities::update_city)
                .delete(cities::delete_city),
        )
        .route(
            "/amenities",
            get(amenities::list_amenities).post(amenities::create_amenity),
        )
        .route(
            "/amenities/{amenity_id}",
            get(amenities::get_amenity)
                .put(amenities::update_amenity)
                .delete(amenities::delete_amenity),
        )
        .route(
            "/cities/{city_id}/places",
            get(places::list_places).post(places::create_place),
        )
        .route(
            "/places/{place_id}",
            get(places::get_place)
                .put(places::update_place)
                .delete(places::delete_place),
        )
        .route("/places_search", post(places_search))
        .route(
            "/places/{place_id}/amenities",
            get(place_amenities::list_place_amenities),
        )
        .route(
            "/places/{place_id}/amenities/{amenity_id}",
            post(place_amenities::link_amenity).delete(place_amenities::unlink_amenity),
        )
        .route(
            "/places/{place_id}/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/reviews/{review_id}",
            get(reviews::get_review)
                .put(reviews::update_review)
                .delete(reviews::delete_review),
        )
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Serves plain HTTP until `signal` resolves, then gives open connections
/// `drain_timeout` to finish. Returns `false` if the deadline cut them off.
async fn serve_plain(
    listener: TcpListener,
    router: Router,
    lifecycle: &Lifecycle,
    drain_timeout: Duration,
    signal: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<bool> {
    info!("serving plain HTTP");

    let server = axum::serve(listener, router)
        .with_graceful_shutdown(signal)
        .into_future();
    let deadline = async {
        lifecycle.shutdown_requested().await;
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => {
            result?;
            Ok(true)
        }
        () = deadline => {
            warn!(?drain_timeout, "graceful shutdown timed out, closing open connections");
            Ok(false)
        }
    }
}

/// Serves TLS with `axum-server` and rustls, reusing the pre-bound listener.
async fn serve_tls(
    listener: TcpListener,
    router: Router,
    tls: &TlsConfig,
    drain_timeout: Duration,
    signal: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    use axum_server::tls_rustls::RustlsConfig;

    let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
        .await
        .with_context(|| {
            format!(
                "failed to load TLS material from {} and {}",
                tls.cert_path.display(),
                tls.key_path.display()
            )
        })?;

    let addr = listener.local_addr()?;
    let std_listener = listener.into_std()?;
    let handle = axum_server::Handle::new();
    let shutdown_handle = handle.clone();

    tokio::spawn(async move {
        signal.await;
        shutdown_handle.graceful_shutdown(Some(drain_timeout));
    });

    info!(%addr, "serving HTTPS");

    axum_server::from_tcp_rustls(std_listener, rustls_config)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;
    Ok(())
}

async fn drain(lifecycle: &Lifecycle, timeout: Duration) {
    if lifecycle.wait_for_drain(timeout).await {
        info!("all requests drained");
    } else {
        warn!(
            remaining = lifecycle.in_flight_count(),
            "drain timeout expired with requests in flight"
        );
    }
}
