// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::create_account,
        handlers::auth::login,
        handlers::auth::reset_password,

        // --- Admin: Companies ---
        handlers::company::create_company,
        handlers::company::list_companies,
        handlers::company::get_company,
        handlers::company::update_company,
        handlers::company::delete_company,

        // --- Admin: Users ---
        handlers::user::create_user,
        handlers::user::list_users,
        handlers::user::get_user,
        handlers::user::update_user,
        handlers::user::delete_user,

        // --- Admin: Service Orders ---
        handlers::service_order::admin_list_service_orders,
        handlers::service_order::admin_get_service_order,

        // --- Manager: Customers ---
        handlers::customer::create_customer,
        handlers::customer::list_customers,
        handlers::customer::get_customer,
        handlers::customer::update_customer,
        handlers::customer::delete_customer,

        // --- Manager: Products ---
        handlers::product::create_product,
        handlers::product::list_products,
        handlers::product::get_product,
        handlers::product::update_product,
        handlers::product::delete_product,

        // --- Manager: Services ---
        handlers::service::create_service,
        handlers::service::list_services,
        handlers::service::get_service,
        handlers::service::update_service,
        handlers::service::delete_service,

        // --- Manager: Service Orders ---
        handlers::service_order::create_service_order,
        handlers::service_order::list_service_orders,
        handlers::service_order::get_service_order,
        handlers::service_order::update_service_order,
        handlers::service_order::delete_service_order,

        // --- Manager: Statistics ---
        handlers::reports::get_statistics,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::CreateAccountPayload,
            models::auth::LoginPayload,
            models::auth::ResetPasswordPayload,
            models::auth::AuthResponse,

            // --- Companies ---
            models::company::Company,
            handlers::company::CreateCompanyPayload,
            handlers::company::UpdateCompanyPayload,

            // --- Users ---
            handlers::user::CreateUserPayload,
            handlers::user::UpdateUserPayload,

            // --- Customers ---
            models::customer::Customer,
            handlers::customer::CreateCustomerPayload,
            handlers::customer::UpdateCustomerPayload,

            // --- Catálogo ---
            models::catalog::ItemType,
            models::catalog::Product,
            models::catalog::Service,
            handlers::product::CreateProductPayload,
            handlers::product::UpdateProductPayload,
            handlers::service::CreateServicePayload,
            handlers::service::UpdateServicePayload,

            // --- Service Orders ---
            models::service_order::OrderStatus,
            models::service_order::ServiceOrder,
            models::service_order::ServiceOrderItem,
            models::service_order::ServiceOrderDetail,
            models::service_order::OrderItemInput,
            models::service_order::OrderItemPatch,
            models::service_order::CreateServiceOrderPayload,
            models::service_order::UpdateServiceOrderPayload,

            // --- Relatórios ---
            models::reports::OrdersByStatus,
            models::reports::CompanyStatistics,
        )
    ),
    tags(
        (name = "Auth", description = "Criação de conta e login"),
        (name = "Admin - Companies", description = "Gestão de empresas (tenants)"),
        (name = "Admin - Users", description = "Gestão de usuários e perfis"),
        (name = "Admin - Service Orders", description = "Visão administrativa das ordens"),
        (name = "Manager - Customers", description = "Clientes da empresa do gestor"),
        (name = "Manager - Products", description = "Catálogo de produtos"),
        (name = "Manager - Services", description = "Catálogo de serviços"),
        (name = "Manager - Service Orders", description = "Ordens de serviço e seus itens"),
        (name = "Manager - Statistics", description = "Indicadores da empresa")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
