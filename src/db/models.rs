use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::schema::{carts, cart_products, categories, customers, notebooks, smartphones};

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = categories)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
}

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = notebooks)]
pub struct Notebook {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub image: String,
    pub image_width: i32,
    pub image_height: i32,
    pub image_size: i32,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub diagonal: String,
    pub display_type: String,
    pub processor_freq: String,
    pub ram: String,
    pub video: String,
    pub time_without_charge: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = notebooks)]
pub struct NewNotebook {
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub image: String,
    pub image_width: i32,
    pub image_height: i32,
    pub image_size: i32,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub diagonal: String,
    pub display_type: String,
    pub processor_freq: String,
    pub ram: String,
    pub video: String,
    pub time_without_charge: String,
}

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = smartphones)]
pub struct Smartphone {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub image: String,
    pub image_width: i32,
    pub image_height: i32,
    pub image_size: i32,
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
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = smartphones)]
pub struct NewSmartphone {
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub image: String,
    pub image_width: i32,
    pub image_height: i32,
    pub image_size: i32,
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

#[derive(AsChangeset, Deserialize, Default)]
#[diesel(table_name = notebooks)]
pub struct UpdateNotebook {
    pub category_id: Option<i32>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub image: Option<String>,
    pub image_width: Option<i32>,
    pub image_height: Option<i32>,
    pub image_size: Option<i32>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub diagonal: Option<String>,
    pub display_type: Option<String>,
    pub processor_freq: Option<String>,
    pub ram: Option<String>,
    pub video: Option<String>,
    pub time_without_charge: Option<String>,
}

#[derive(AsChangeset, Deserialize, Default)]
#[diesel(table_name = smartphones)]
pub struct UpdateSmartphone {
    pub category_id: Option<i32>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub image: Option<String>,
    pub image_width: Option<i32>,
    pub image_height: Option<i32>,
    pub image_size: Option<i32>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub diagonal: Option<String>,
    pub display_type: Option<String>,
    pub resolution: Option<String>,
    pub accum_volume: Option<String>,
    pub ram: Option<String>,
    pub sd: Option<bool>,
    pub sd_max_volume: Option<String>,
    pub main_cam_mp: Option<String>,
    pub frontal_cam_mp: Option<String>,
}

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = customers)]
pub struct Customer {
    pub id: i32,
    pub user_id: i32,
    pub phone: String,
    pub address: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = customers)]
pub struct NewCustomer {
    pub user_id: i32,
    pub phone: String,
    pub address: String,
}

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = carts)]
pub struct Cart {
    pub id: i32,
    pub owner_id: i32,
    pub total_products: i32,
    pub final_price: BigDecimal,
    pub in_order: bool,
    pub for_anonymous_user: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = carts)]
pub struct NewCart {
    pub owner_id: i32,
    pub for_anonymous_user: bool,
}

#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = cart_products)]
pub struct CartProduct {
    pub id: i32,
    pub customer_id: i32,
    pub cart_id: i32,
    pub product_kind: String,
    pub product_id: i32,
    pub qty: i32,
    pub final_price: BigDecimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = cart_products)]
pub struct NewCartProduct {
    pub customer_id: i32,
    pub cart_id: i32,
    pub product_kind: String,
    pub product_id: i32,
    pub qty: i32,
    pub final_price: BigDecimal,
}
