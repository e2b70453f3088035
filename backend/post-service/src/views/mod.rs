//! HTML views.
//!
//! Handlers never touch tera directly; they ask a [`ViewRenderer`] for a
//! named template and get a response back.

use crate::error::{AppError, Result};
use actix_web::{http::header::ContentType, HttpRequest, HttpResponse};
use async_trait::async_trait;
use serde_json::Value;
use tera::{Context, Tera};

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Renders a named template against a JSON object context.
#[async_trait(?Send)]
pub trait ViewRenderer: Send + Sync {
    async fn render(&self, template: &str, context: Value, req: &HttpRequest)
        -> Result<HttpResponse>;
}

/// tera-backed renderer.
///
/// Template `name` resolves to `name` or, failing that, `name.html`. The
/// request path is exposed to templates as `request_path` (no trailing `/`).
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Only the templates compiled into the binary.
    pub fn embedded() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { tera })
    }

    /// Templates matching `glob`, falling back to the embedded ones for any
    /// name the directory does not provide.
    pub fn from_glob(glob: &str) -> Result<Self> {
        let mut tera = Tera::new(glob)?;
        let has_index = tera.get_template_names().any(|name| name == "index.html");
        if !has_index {
            tracing::warn!(%glob, "no index.html in template directory; using embedded template");
            tera.add_raw_template("index.html", INDEX_TEMPLATE)?;
        }
        Ok(Self { tera })
    }

    fn resolve_name(&self, template: &str) -> Option<String> {
        let candidates = [template.to_string(), format!("{}.html", template)];
        candidates
            .into_iter()
            .find(|name| self.tera.get_template_names().any(|known| known == name.as_str()))
    }
}

#[async_trait(?Send)]
impl ViewRenderer for TeraRenderer {
    async fn render(
        &self,
        template: &str,
        context: Value,
        req: &HttpRequest,
    ) -> Result<HttpResponse> {
        let name = self
            .resolve_name(template)
            .ok_or_else(|| AppError::RenderError(format!("template '{}' not found", template)))?;

        if !context.is_object() {
            return Err(AppError::RenderError(format!(
                "context for '{}' must be an object",
                template
            )));
        }

        let mut ctx = Context::from_value(context)?;
        ctx.insert("request_path", req.path().trim_end_matches('/'));

        let body = self.tera.render(&name, &ctx)?;

        Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(body))
    }
}
