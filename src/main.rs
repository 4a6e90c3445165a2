use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use serde::Deserialize;
use serde_json::json;

use shop_backend::catalog::kind::ProductKind;
use shop_backend::catalog::latest::get_products_for_main_page;
use shop_backend::db;
use shop_backend::db::connection::PgPool;
use shop_backend::db::models::{NewCategory, NewCustomer, UpdateNotebook, UpdateSmartphone};
use shop_backend::db::repository;
use shop_backend::error::CatalogError;
use shop_backend::models::{
    AddToCartRequest, CartLineView, CartView, ChangeQtyRequest, CreateCustomerRequest,
    MainPageQuery, NewNotebookRequest, NewSmartphoneRequest,
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub struct AppState {
    pool: PgPool,
}

fn get_conn(
    data: &web::Data<AppState>,
) -> Result<db::connection::PgPooledConnection, HttpResponse> {
    data.pool.get().map_err(|_| {
        HttpResponse::ServiceUnavailable()
            .json(json!({"message": "Database connection unavailable"}))
    })
}

fn error_response(err: CatalogError) -> HttpResponse {
    match &err {
        CatalogError::MinResolution { .. }
        | CatalogError::MaxResolution { .. }
        | CatalogError::ImageDecode(_)
        | CatalogError::UnknownSubtype(_)
        | CatalogError::InvalidQuantity(_) => {
            HttpResponse::BadRequest().json(json!({"message": err.to_string()}))
        }
        CatalogError::CartClosed(_) => {
            HttpResponse::Conflict().json(json!({"message": err.to_string()}))
        }
        _ if err.is_not_found() => HttpResponse::NotFound().finish(),
        _ => HttpResponse::InternalServerError().json(json!({"message": err.to_string()})),
    }
}

fn decode_image(data: &str) -> Result<Vec<u8>, HttpResponse> {
    BASE64.decode(data).map_err(|_| {
        HttpResponse::BadRequest().json(json!({"message": "image_data is not valid base64"}))
    })
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

async fn get_sidebar_categories(data: web::Data<AppState>) -> impl Responder {
    let mut conn = match get_conn(&data) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    match repository::get_categories_for_left_sidebar(&mut conn) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(err),
    }
}

async fn get_categories(data: web::Data<AppState>) -> impl Responder {
    let mut conn = match get_conn(&data) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    match repository::get_all_categories(&mut conn) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

async fn create_category(
    data: web::Data<AppState>,
    category: web::Json<NewCategory>,
) -> impl Responder {
    let mut conn = match get_conn(&data) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    if category.name.trim().is_empty() || category.slug.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(json!({"message": "Category name and slug cannot be empty"}));
    }
    match repository::create_category(&mut conn, category.into_inner()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

async fn get_main_page_products(
    data: web::Data<AppState>,
    query: web::Query<MainPageQuery>,
) -> impl Responder {
    let mut conn = match get_conn(&data) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let subtypes: Vec<&str> = ProductKind::ALL.iter().map(|k| k.as_str()).collect();
    match get_products_for_main_page(&mut conn, &subtypes, query.with_respect_to.as_deref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

async fn get_product_detail(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (ct_model, slug) = path.into_inner();
    let Some(kind) = ProductKind::parse(&ct_model) else {
        return HttpResponse::NotFound().finish();
    };
    let mut conn = match get_conn(&data) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    match repository::get_product_by_slug(&mut conn, kind, &slug) {
        Ok(product) => {
            let url = product.product_url("product_detail");
            HttpResponse::Ok().json(json!({"product": product, "url": url}))
        }
        Err(diesel::result::Error::NotFound) => HttpResponse::NotFound().finish(),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

async fn create_notebook(
    data: web::Data<AppState>,
    req: web::Json<NewNotebookRequest>,
) -> impl Responder {
    let mut conn = match get_conn(&data) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let req = req.into_inner();
    let image_data = match decode_image(&req.image_data) {
        Ok(bytes) => bytes,
        Err(resp) => return resp,
    };
    match repository::create_notebook(&mut conn, req.into_row(), &image_data) {
        Ok(notebook) => HttpResponse::Created().json(notebook),
        Err(err) => error_response(err),
    }
}

async fn create_smartphone(
    data: web::Data<AppState>,
    req: web::Json<NewSmartphoneRequest>,
) -> impl Responder {
    let mut conn = match get_conn(&data) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let req = req.into_inner();
    let image_data = match decode_image(&req.image_data) {
        Ok(bytes) => bytes,
        Err(resp) => return resp,
    };
    match repository::create_smartphone(&mut conn, req.into_row(), &image_data) {
        Ok(smartphone) => HttpResponse::Created().json(smartphone),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
struct UpdateNotebookRequest {
    #[serde(flatten)]
    changes: UpdateNotebook,
    image_data: Option<String>,
}

async fn update_notebook(
    data: web::Data<AppState>,
    id: web::Path<i32>,
    req: web::Json<UpdateNotebookRequest>,
) -> impl Responder {
    let mut conn = match get_conn(&data) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let req = req.into_inner();
    let image_data = match &req.image_data {
        Some(encoded) => match decode_image(encoded) {
            Ok(bytes) => Some(bytes),
            Err(resp) => return resp,
        },
        None => None,
    };
    match repository::update_notebook(&mut conn, id.into_inner(), req.changes, image_data.as_deref())
    {
        Ok(notebook) => HttpResponse::Ok().json(notebook),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
struct UpdateSmartphoneRequest {
    #[serde(flatten)]
    changes: UpdateSmartphone,
    image_data: Option<String>,
}

async fn update_smartphone(
    data: web::Data<AppState>,
    id: web::Path<i32>,
    req: web::Json<UpdateSmartphoneRequest>,
) -> impl Responder {
    let mut conn = match get_conn(&data) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let req = req.into_inner();
    let image_data = match &req.image_data {
        Some(encoded) => match decode_image(encoded) {
            Ok(bytes) => Some(bytes),
            Err(resp) => return resp,
        },
        None => None,
    };
    match repository::update_smartphone(
        &mut conn,
        id.into_inner(),
        req.changes,
        image_data.as_deref(),
    ) {
        Ok(smartphone) => HttpResponse::Ok().json(smartphone),
        Err(err) => error_response(err),
    }
}

// ---------------------------------------------------------------------------
// Customers and carts
// ---------------------------------------------------------------------------

async fn create_customer(
    data: web::Data<AppState>,
    req: web::Json<CreateCustomerRequest>,
) -> impl Responder {
    let mut conn = match get_conn(&data) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let req = req.into_inner();
    let new_customer = NewCustomer {
        user_id: req.user_id,
        phone: req.phone,
        address: req.address,
    };
    match repository::create_customer(&mut conn, new_customer) {
        Ok(customer) => HttpResponse::Created().json(customer),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

async fn get_customer_cart(data: web::Data<AppState>, customer_id: web::Path<i32>) -> impl Responder {
    let mut conn = match get_conn(&data) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let cart = match repository::get_or_create_cart(&mut conn, customer_id.into_inner()) {
        Ok(cart) => cart,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };
    match repository::get_cart_contents(&mut conn, cart.id) {
        Ok(contents) => {
            let products = contents
                .into_iter()
                .map(|(item, product)| CartLineView { item, product })
                .collect();
            HttpResponse::Ok().json(CartView { cart, products })
        }
        Err(err) => error_response(err),
    }
}

async fn add_to_cart(data: web::Data<AppState>, req: web::Json<AddToCartRequest>) -> impl Responder {
    let mut conn = match get_conn(&data) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let req = req.into_inner();
    let Some(kind) = ProductKind::parse(&req.product_kind) else {
        return error_response(CatalogError::UnknownSubtype(req.product_kind));
    };
    let cart = match repository::get_or_create_cart(&mut conn, req.customer_id) {
        Ok(cart) => cart,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };
    match repository::add_to_cart(
        &mut conn,
        req.customer_id,
        cart.id,
        kind,
        req.product_id,
        req.qty,
    ) {
        Ok(line) => HttpResponse::Created().json(line),
        Err(err) => error_response(err),
    }
}

async fn change_cart_qty(
    data: web::Data<AppState>,
    id: web::Path<i32>,
    req: web::Json<ChangeQtyRequest>,
) -> impl Responder {
    let mut conn = match get_conn(&data) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    match repository::change_qty(&mut conn, id.into_inner(), req.qty) {
        Ok(line) => HttpResponse::Ok().json(line),
        Err(err) => error_response(err),
    }
}

async fn remove_from_cart(data: web::Data<AppState>, id: web::Path<i32>) -> impl Responder {
    let mut conn = match get_conn(&data) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    match repository::remove_from_cart(&mut conn, id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

async fn start_server(pool: PgPool) -> std::io::Result<()> {
    let bind = db::connection::server_bind();
    println!("Starting HTTP server on http://{}", bind);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(web::Data::new(AppState { pool: pool.clone() }))
            .route("/api/get/categories", web::get().to(get_categories))
            .route("/api/get/categories/sidebar", web::get().to(get_sidebar_categories))
            .route("/api/post/categories", web::post().to(create_category))
            .route("/api/get/products/main", web::get().to(get_main_page_products))
            .route("/api/get/products/{ct_model}/{slug}", web::get().to(get_product_detail))
            .route("/api/post/notebooks", web::post().to(create_notebook))
            .route("/api/patch/notebooks/{id}", web::patch().to(update_notebook))
            .route("/api/post/smartphones", web::post().to(create_smartphone))
            .route("/api/patch/smartphones/{id}", web::patch().to(update_smartphone))
            .route("/api/post/customers", web::post().to(create_customer))
            .route("/api/get/cart/{customer_id}", web::get().to(get_customer_cart))
            .route("/api/post/cart", web::post().to(add_to_cart))
            .route("/api/patch/cart/{id}", web::patch().to(change_cart_qty))
            .route("/api/delete/cart/{id}", web::delete().to(remove_from_cart))
    })
    .bind(bind)?
    .run()
    .await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let pool = db::connection::get_pool().clone();
    {
        let conn = &mut db::connection::get_conn();
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Failed to run migrations");
    }

    start_server(pool).await
}
