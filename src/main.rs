// src/main.rs

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{admin_guard, auth_guard, manager_guard};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let (app_state, mailer) = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // O worker da fila roda em paralelo, do boot até o fim do processo.
    tokio::spawn(app_state.email_queue.clone().run_worker(Arc::new(mailer)));

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/users", post(handlers::auth::create_account))
        .route("/sessions/password", post(handlers::auth::login))
        .route("/password/reset", post(handlers::auth::reset_password));

    // Rotas administrativas (perfil general_admin)
    let admin_routes = Router::new()
        .route(
            "/companies",
            post(handlers::company::create_company).get(handlers::company::list_companies),
        )
        .route(
            "/companies/{id}",
            get(handlers::company::get_company)
                .put(handlers::company::update_company)
                .delete(handlers::company::delete_company),
        )
        .route(
            "/users",
            post(handlers::user::create_user).get(handlers::user::list_users),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        .route(
            "/service-orders",
            get(handlers::service_order::admin_list_service_orders),
        )
        .route(
            "/service-orders/{id}",
            get(handlers::service_order::admin_get_service_order),
        )
        // O auth_guard roda primeiro (camada mais externa), depois o perfil.
        .route_layer(axum_middleware::from_fn(admin_guard))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas do gestor (perfil manager, escopo da empresa dele)
    let manager_routes = Router::new()
        .route(
            "/customers",
            post(handlers::customer::create_customer).get(handlers::customer::list_customers),
        )
        .route(
            "/customers/{id}",
            get(handlers::customer::get_customer)
                .put(handlers::customer::update_customer)
                .delete(handlers::customer::delete_customer),
        )
        .route(
            "/products",
            post(handlers::product::create_product).get(handlers::product::list_products),
        )
        .route(
            "/products/{id}",
            get(handlers::product::get_product)
                .put(handlers::product::update_product)
                .delete(handlers::product::delete_product),
        )
        .route(
            "/services",
            post(handlers::service::create_service).get(handlers::service::list_services),
        )
        .route(
            "/services/{id}",
            get(handlers::service::get_service)
                .put(handlers::service::update_service)
                .delete(handlers::service::delete_service),
        )
        .route(
            "/service-orders",
            post(handlers::service_order::create_service_order)
                .get(handlers::service_order::list_service_orders),
        )
        .route(
            "/service-orders/{id}",
            get(handlers::service_order::get_service_order)
                .put(handlers::service_order::update_service_order)
                .delete(handlers::service_order::delete_service_order),
        )
        .route("/statistics", get(handlers::reports::get_statistics))
        .route_layer(axum_middleware::from_fn(manager_guard))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/auth", auth_routes)
        .nest("/admin", admin_routes)
        .nest("/manager", manager_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3333";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
