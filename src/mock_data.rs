use bigdecimal::BigDecimal;
use chrono::Utc;

use crate::db::models::{Cart, CartProduct, Category, Notebook, Smartphone};

pub fn sample_category(id: i32, name: &str, slug: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        slug: slug.to_string(),
        created_at: Utc::now().naive_utc(),
        updated_at: Utc::now().naive_utc(),
    }
}

pub fn sample_notebook(id: i32, category_id: i32, slug: &str) -> Notebook {
    Notebook {
        id,
        category_id,
        title: format!("Notebook {}", id),
        slug: slug.to_string(),
        image: "/media/notebooks/placeholder.png".to_string(),
        image_width: 600,
        image_height: 600,
        image_size: 20480,
        description: Some("A sample notebook".to_string()),
        price: BigDecimal::from(69999),
        diagonal: "15.6".to_string(),
        display_type: "IPS".to_string(),
        processor_freq: "3.2 GHz".to_string(),
        ram: "16 GB".to_string(),
        video: "GeForce RTX 3050".to_string(),
        time_without_charge: "10 hours".to_string(),
        created_at: Utc::now().naive_utc(),
        updated_at: Utc::now().naive_utc(),
    }
}

pub fn sample_smartphone(id: i32, category_id: i32, slug: &str) -> Smartphone {
    Smartphone {
        id,
        category_id,
        title: format!("Smartphone {}", id),
        slug: slug.to_string(),
        image: "/media/smartphones/placeholder.png".to_string(),
        image_width: 500,
        image_height: 500,
        image_size: 15360,
        description: Some("A sample smartphone".to_string()),
        price: BigDecimal::from(29999),
        diagonal: "6.1".to_string(),
        display_type: "OLED".to_string(),
        resolution: "2400x1080".to_string(),
        accum_volume: "4500 mAh".to_string(),
        ram: "8 GB".to_string(),
        sd: true,
        sd_max_volume: Some("512 GB".to_string()),
        main_cam_mp: "50 MP".to_string(),
        frontal_cam_mp: "12 MP".to_string(),
        created_at: Utc::now().naive_utc(),
        updated_at: Utc::now().naive_utc(),
    }
}

pub fn sample_cart(id: i32, owner_id: i32) -> Cart {
    Cart {
        id,
        owner_id,
        total_products: 0,
        final_price: BigDecimal::from(0),
        in_order: false,
        for_anonymous_user: false,
        created_at: Utc::now().naive_utc(),
        updated_at: Utc::now().naive_utc(),
    }
}

pub fn sample_cart_product(
    id: i32,
    cart_id: i32,
    product_kind: &str,
    product_id: i32,
    qty: i32,
    final_price: BigDecimal,
) -> CartProduct {
    CartProduct {
        id,
        customer_id: 1,
        cart_id,
        product_kind: product_kind.to_string(),
        product_id,
        qty,
        final_price,
        created_at: Utc::now().naive_utc(),
        updated_at: Utc::now().naive_utc(),
    }
}
