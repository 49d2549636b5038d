use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::products::list_products,
        api::products::get_product,
        api::import::suggest_mapping,
        api::import::preview_import,
        api::import::commit_import,
        api::maintenance::suggestions,
    ),
    tags(
        (name = "tankwiki", description = "TankWiki catalog API")
    )
)]
pub struct ApiDoc;
