pub mod auth_service;
pub mod email_queue;
pub mod mail_templates;
pub mod mailer;
pub mod service_order_service;
pub mod tenant;

pub use auth_service::AuthService;
pub use email_queue::EmailQueue;
pub use mailer::Mailer;
pub use service_order_service::ServiceOrderService;
pub use tenant::TenantResolver;
