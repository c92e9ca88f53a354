//! Request routing table.
//!
//! | Method | Path                 | Handler                    |
//! |--------|----------------------|----------------------------|
//! | GET    | `/`, `/hu`           | [`greeting::greet`]        |
//! | GET    | `/healthz`           | [`health::healthz`]        |
//! | GET    | `/users`             | [`users::list_users`]      |
//! | GET    | `/users/{id:[0-9]+}` | [`users::get_user`]        |
//! | POST   | `/users`             | [`users::create_user`]     |
//! | DELETE | `/users/{id:[0-9]+}` | [`users::delete_user`]     |
//!
//! Requests matching no row fall through to Actix's default 404.

use actix_web::web;

use super::{greeting, health, users};

/// Register every endpoint on the given service config.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::routes::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(greeting::greet)
        .service(health::healthz)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::create_user)
        .service(users::delete_user);
}
