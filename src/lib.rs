//! # actix-swagger-firebase
//!
//! This crate puts Firebase Authentication in front of a Swagger UI page. It
//! generates a browser script that replaces Swagger UI's "Authorize" dialog
//! with a FirebaseUI sign-in modal, installs the user's Firebase ID token as
//! the bearer token of a configured security scheme, and refreshes that token
//! before it expires.
//!
//! The same refresh rules are available natively through
//! [`RefreshCoordinator`](refresh::RefreshCoordinator), with a
//! secure-token based identity provider in [`securetoken`].
//!
//! ## Example
//!
//! ```no_run
//! use actix_web::{web, App, HttpResponse, HttpServer};
//! use actix_swagger_firebase::{FirebaseConfig, Options, SignInProvider, SwaggerUiFirebase};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let options = Options {
//!         providers: vec![SignInProvider::Email, SignInProvider::Google],
//!         ..Options::default()
//!     };
//!     let docs = SwaggerUiFirebase::new(FirebaseConfig::from_env(), options)
//!         .expect("FIREBASE_API_KEY, FIREBASE_AUTH_DOMAIN and FIREBASE_PROJECT_ID must be set");
//!
//!     HttpServer::new(move || {
//!         App::new()
//!             .route("/openapi.json", web::get().to(openapi))
//!             .service(docs.service("/docs", "/openapi.json", "My API").unwrap())
//!     })
//!     .bind(("127.0.0.1", 8080))?
//!     .run()
//!     .await
//! }
//!
//! async fn openapi() -> HttpResponse {
//!     HttpResponse::Ok().json(serde_json::json!({ "openapi": "3.0.3", "paths": {} }))
//! }
//! ```

mod config;
mod error;
mod impls;
mod options;
mod provider;
pub mod refresh;
pub mod script;
pub mod securetoken;
pub mod token;

pub use config::*;
pub use error::*;
pub use impls::SCRIPT_PATH;
pub use options::*;
pub use provider::*;
pub use script::SwaggerUiFirebase;

/// Target of every log event emitted by this crate.
pub(crate) const LOG_TARGET: &str = "swagger_firebase";
