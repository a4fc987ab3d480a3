//! Minimal Actix Web server demonstrating [`SwaggerUiFirebase`].
//!
//! This server exposes:
//! - `/docs`: Swagger UI with the Firebase sign-in modal.
//! - `/openapi.json`: An OpenAPI document declaring the `firebase` security scheme.
//! - `/whoami`: Echoes the `Authorization` header Swagger UI sends.
//!
//! The Firebase web config is read from `FIREBASE_API_KEY`, `FIREBASE_AUTH_DOMAIN`
//! and `FIREBASE_PROJECT_ID`. If `FIREBASE_REFRESH_TOKEN` is also set, the server
//! signs in with it and keeps an ID token fresh in the background, logging every
//! change.

use std::env;

use actix_swagger_firebase::refresh::{InMemoryAuthorizations, RefreshCoordinator};
use actix_swagger_firebase::securetoken::{SecureTokenClient, SecureTokenProvider};
use actix_swagger_firebase::{FirebaseConfig, Options, SignInProvider, SwaggerUiFirebase};
use actix_web::{get, App, HttpRequest, HttpResponse, HttpServer, Responder};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,swagger_firebase=debug")),
        )
        .init();

    let config = FirebaseConfig::from_env();
    let options = Options {
        providers: vec![SignInProvider::Email, SignInProvider::Google, SignInProvider::Github],
        ..Options::default()
    };

    let docs = match SwaggerUiFirebase::new(config.clone(), options.clone()) {
        Ok(docs) => docs,
        Err(e) => {
            eprintln!("Invalid Firebase configuration: {e}");
            std::process::exit(1);
        }
    };

    // Optional: keep a server-side token fresh with the same refresh rules.
    let _coordinator = match (env::var("FIREBASE_REFRESH_TOKEN"), config.api_key()) {
        (Ok(refresh_token), Some(api_key)) => {
            let provider = SecureTokenProvider::new(SecureTokenClient::new(api_key));
            let identity = provider.subscribe();
            let coordinator =
                RefreshCoordinator::new(provider, InMemoryAuthorizations::new(), &options);
            coordinator.watch(identity);

            if let Err(e) = coordinator
                .provider()
                .sign_in_with_refresh_token(&refresh_token)
                .await
            {
                eprintln!("Sign-in with FIREBASE_REFRESH_TOKEN failed: {e}");
            }
            Some(coordinator)
        }
        _ => None,
    };

    HttpServer::new(move || {
        App::new()
            .service(openapi)
            .service(whoami)
            .service(
                docs.service("/docs", "/openapi.json", "Demo API")
                    .expect("docs page renders"),
            )
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}

#[get("/openapi.json")]
async fn openapi() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "openapi": "3.0.3",
        "info": { "title": "Demo API", "version": "1.0.0" },
        "components": {
            "securitySchemes": {
                "firebase": { "type": "apiKey", "in": "header", "name": "authorization" }
            }
        },
        "security": [{ "firebase": [] }],
        "paths": {
            "/whoami": {
                "get": {
                    "summary": "Echo the Authorization header",
                    "responses": { "200": { "description": "The header value" } }
                }
            }
        }
    }))
}

// Returns the Authorization header sent by Swagger UI, or "Anonymous"
#[get("/whoami")]
async fn whoami(req: HttpRequest) -> impl Responder {
    match req.headers().get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) => HttpResponse::Ok().body(value.to_owned()),
        None => HttpResponse::Ok().body("Anonymous"),
    }
}
