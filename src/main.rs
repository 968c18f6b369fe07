// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Si la configuración falla no hay nada que servir.
    let app_state = AppState::new()
        .await
        .expect("Falló la inicialización del estado de la aplicación.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Fallaron las migraciones de la base de datos.");

    tracing::info!("Migraciones de la base de datos ejecutadas");

    // Rutas públicas de autenticación.
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new().route("/me", get(handlers::auth::me));

    let convenio_routes = Router::new()
        .route(
            "/",
            get(handlers::convenios::listar_convenios)
                .post(handlers::convenios::crear_convenio)
                .put(handlers::convenios::actualizar_convenio)
                .delete(handlers::convenios::eliminar_convenio),
        )
        .route(
            "/check-consecutivo",
            get(handlers::convenios::check_consecutivo),
        )
        .route(
            "/max-consecutivo",
            get(handlers::convenios::max_consecutivo),
        );

    let registro_routes = Router::new().route(
        "/",
        get(handlers::registros::listar_registros)
            .post(handlers::registros::crear_registro)
            .put(handlers::registros::actualizar_registro)
            .delete(handlers::registros::eliminar_registro),
    );

    let historial_routes = Router::new().route(
        "/",
        get(handlers::historial::listar_historial)
            .post(handlers::historial::agregar_evento)
            .delete(handlers::historial::eliminar_evento),
    );

    let inventario_routes = Router::new().route(
        "/",
        get(handlers::inventario::listar_inventario)
            .post(handlers::inventario::crear_item)
            .put(handlers::inventario::actualizar_item)
            .delete(handlers::inventario::eliminar_item),
    );

    let oportunidad_routes = Router::new().route(
        "/",
        get(handlers::oportunidades::listar_oportunidades)
            .post(handlers::oportunidades::crear_oportunidad)
            .put(handlers::oportunidades::actualizar_oportunidad)
            .delete(handlers::oportunidades::eliminar_oportunidad),
    );

    let estadisticas_routes = Router::new()
        .route("/convenios", get(handlers::estadisticas::resumen_convenios))
        .route(
            "/oportunidades",
            get(handlers::estadisticas::resumen_oportunidades),
        );

    // Todo lo que toca datos va detrás del guard.
    let protected_routes = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/convenios", convenio_routes)
        .nest("/api/registro_procesos", registro_routes)
        .nest("/api/historial_registro_procesos", historial_routes)
        .nest("/api/inventario", inventario_routes)
        .nest("/api/oportunidades", oportunidad_routes)
        .nest("/api/estadisticas", estadisticas_routes)
        .route("/api/upload", post(handlers::archivos::subir_archivo))
        .route("/api/delete_file", post(handlers::archivos::eliminar_archivo))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        // Los documentos se sirven sin token: las URLs van embebidas en
        // los visores del frontend.
        .route("/uploads/{archivo}", get(handlers::archivos::descargar_archivo))
        .merge(protected_routes)
        .with_state(app_state);

    let puerto = std::env::var("PUERTO").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{puerto}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falló el listener TCP");
    tracing::info!("Servidor escuchando en {}", addr);
    axum::serve(listener, app).await.expect("Error en el servidor");
}
