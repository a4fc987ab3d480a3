use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError, Scope};

use crate::{Error, SwaggerUiFirebase};

/// Path of the generated script inside the scope returned by
/// [`SwaggerUiFirebase::service`].
pub const SCRIPT_PATH: &str = "/swagger-firebase.js";

impl ResponseError for Error {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            // The docs page cannot be built; nothing the client can fix
            Error::MissingConfigField(_) | Error::InvalidOption(_) | Error::Serialize(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

struct DocsAssets {
    page: String,
    script: String,
}

impl SwaggerUiFirebase {
    /// An Actix Web scope mounted at `path` serving the Swagger UI page for
    /// the OpenAPI document at `spec_url`, plus the generated script on its
    /// own at [`SCRIPT_PATH`].
    pub fn service(&self, path: &str, spec_url: &str, title: &str) -> crate::Result<Scope> {
        let assets = web::Data::new(DocsAssets {
            page: self.html_page(spec_url, title)?,
            script: self.script().to_owned(),
        });

        Ok(web::scope(path)
            .app_data(assets)
            .route("", web::get().to(index))
            .route("/", web::get().to(index))
            .route(SCRIPT_PATH, web::get().to(script)))
    }
}

async fn index(assets: web::Data<DocsAssets>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .body(assets.page.clone())
}

async fn script(assets: web::Data<DocsAssets>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .body(assets.script.clone())
}
