use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::catalog::kind::ProductVariant;
use crate::db::models::{Cart, CartProduct, NewNotebook, NewSmartphone};

/// Create-notebook payload. `image_data` carries the blob bytes as base64;
/// the decoded dimensions and byte size are filled in by the repository
/// after validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewNotebookRequest {
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub image: String,
    pub image_data: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub diagonal: String,
    pub display_type: String,
    pub processor_freq: String,
    pub ram: String,
    pub video: String,
    pub time_without_charge: String,
}

impl NewNotebookRequest {
    pub fn into_row(self) -> NewNotebook {
        NewNotebook {
            category_id: self.category_id,
            title: self.title,
            slug: self.slug,
            image: self.image,
            image_width: 0,
            image_height: 0,
            image_size: 0,
            description: self.description,
            price: self.price,
            diagonal: self.diagonal,
            display_type: self.display_type,
            processor_freq: self.processor_freq,
            ram: self.ram,
            video: self.video,
            time_without_charge: self.time_without_charge,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewSmartphoneRequest {
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub image: String,
    pub image_data: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub diagonal: String,
    pub display_type: String,
    pub resolution: String,
    pub accum_volume: String,
    pub ram: String,
    pub sd: bool,
    pub sd_max_volume: Option<String>,
    pub main_cam_mp: String,
    pub frontal_cam_mp: String,
}

impl NewSmartphoneRequest {
    pub fn into_row(self) -> NewSmartphone {
        NewSmartphone {
            category_id: self.category_id,
            title: self.title,
            slug: self.slug,
            image: self.image,
            image_width: 0,
            image_height: 0,
            image_size: 0,
            description: self.description,
            price: self.price,
            diagonal: self.diagonal,
            display_type: self.display_type,
            resolution: self.resolution,
            accum_volume: self.accum_volume,
            ram: self.ram,
            sd: self.sd,
            sd_max_volume: self.sd_max_volume,
            main_cam_mp: self.main_cam_mp,
            frontal_cam_mp: self.frontal_cam_mp,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MainPageQuery {
    pub with_respect_to: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub customer_id: i32,
    pub product_kind: String,
    pub product_id: i32,
    #[serde(default = "default_qty")]
    pub qty: i32,
}

fn default_qty() -> i32 {
    1
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChangeQtyRequest {
    pub qty: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    pub user_id: i32,
    pub phone: String,
    pub address: String,
}

/// A cart line together with its resolved product.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub item: CartProduct,
    pub product: ProductVariant,
}

#[derive(Debug, Serialize)]
pub struct CartView {
    pub cart: Cart,
    pub products: Vec<CartLineView>,
}
