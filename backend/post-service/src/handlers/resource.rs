/// REST resource controller contract and route registration
///
/// A resource is registered with [`configure`], which wires the seven
/// standard operations onto a collection path and its member path:
///
/// | Verb   | Path              | Operation |
/// |--------|-------------------|-----------|
/// | GET    | `{base}`          | index     |
/// | POST   | `{base}`          | create    |
/// | DELETE | `{base}`          | clear     |
/// | GET    | `{base}/{id}`     | show      |
/// | PATCH  | `{base}/{id}`     | update    |
/// | PUT    | `{base}/{id}`     | replace   |
/// | DELETE | `{base}/{id}`     | delete    |
///
/// Member routes resolve the entity before the operation runs: an id that
/// does not parse as `C::Id` is rejected by the router with 404, and an id
/// with no stored entity fails `resolve` with `NotFound`.
use crate::error::Result;
use crate::metrics::record_operation;
use actix_web::{web, HttpRequest, HttpResponse};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[async_trait(?Send)]
pub trait ResourceController: 'static {
    /// Resource name used in logs and metrics.
    const NAME: &'static str;

    type Entity: 'static;
    type Id: DeserializeOwned + 'static;

    /// Look up the entity a member route addresses.
    async fn resolve(&self, id: Self::Id) -> Result<Self::Entity>;

    async fn index(&self, req: &HttpRequest) -> Result<HttpResponse>;
    async fn create(&self, req: &HttpRequest, body: web::Bytes) -> Result<HttpResponse>;
    async fn show(&self, req: &HttpRequest, entity: Self::Entity) -> Result<HttpResponse>;
    async fn update(
        &self,
        req: &HttpRequest,
        entity: Self::Entity,
        body: web::Bytes,
    ) -> Result<HttpResponse>;
    async fn replace(
        &self,
        req: &HttpRequest,
        entity: Self::Entity,
        body: web::Bytes,
    ) -> Result<HttpResponse>;
    async fn delete(&self, req: &HttpRequest, entity: Self::Entity) -> Result<HttpResponse>;
    async fn clear(&self, req: &HttpRequest) -> Result<HttpResponse>;
}

/// Register all seven operations of `C` under `base`.
///
/// The controller itself must be present as `web::Data<C>` app data.
pub fn configure<C: ResourceController>(cfg: &mut web::ServiceConfig, base: &str) {
    let base = base.trim_end_matches('/');
    let member = format!("{}/{{id}}", base);

    cfg.service(
        web::resource(base)
            .route(web::get().to(index::<C>))
            .route(web::post().to(create::<C>))
            .route(web::delete().to(clear::<C>)),
    )
    .service(
        web::resource(member)
            .route(web::get().to(show::<C>))
            .route(web::patch().to(update::<C>))
            .route(web::put().to(replace::<C>))
            .route(web::delete().to(delete::<C>)),
    );
}

fn observe<C: ResourceController>(
    operation: &str,
    result: Result<HttpResponse>,
) -> Result<HttpResponse> {
    record_operation(C::NAME, operation, result.is_ok());
    if let Err(err) = &result {
        tracing::debug!(resource = C::NAME, operation, error = %err, "operation failed");
    }
    result
}

async fn index<C: ResourceController>(
    controller: web::Data<C>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    observe::<C>("index", controller.index(&req).await)
}

async fn create<C: ResourceController>(
    controller: web::Data<C>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    observe::<C>("create", controller.create(&req, body).await)
}

async fn show<C: ResourceController>(
    controller: web::Data<C>,
    req: HttpRequest,
    id: web::Path<C::Id>,
) -> Result<HttpResponse> {
    let result = match controller.resolve(id.into_inner()).await {
        Ok(entity) => controller.show(&req, entity).await,
        Err(err) => Err(err),
    };
    observe::<C>("show", result)
}

async fn update<C: ResourceController>(
    controller: web::Data<C>,
    req: HttpRequest,
    id: web::Path<C::Id>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let result = match controller.resolve(id.into_inner()).await {
        Ok(entity) => controller.update(&req, entity, body).await,
        Err(err) => Err(err),
    };
    observe::<C>("update", result)
}

async fn replace<C: ResourceController>(
    controller: web::Data<C>,
    req: HttpRequest,
    id: web::Path<C::Id>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let result = match controller.resolve(id.into_inner()).await {
        Ok(entity) => controller.replace(&req, entity, body).await,
        Err(err) => Err(err),
    };
    observe::<C>("replace", result)
}

async fn delete<C: ResourceController>(
    controller: web::Data<C>,
    req: HttpRequest,
    id: web::Path<C::Id>,
) -> Result<HttpResponse> {
    let result = match controller.resolve(id.into_inner()).await {
        Ok(entity) => controller.delete(&req, entity).await,
        Err(err) => Err(err),
    };
    observe::<C>("delete", result)
}

async fn clear<C: ResourceController>(
    controller: web::Data<C>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    observe::<C>("clear", controller.clear(&req).await)
}
