use diesel::prelude::*;

diesel::table! {
    categories (id) {
        id -> Int4,
        name -> Varchar,
        slug -> Varchar,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    notebooks (id) {
        id -> Int4,
        category_id -> Int4,
        title -> Varchar,
        slug -> Varchar,
        image -> Varchar,
        image_width -> Int4,
        image_height -> Int4,
        image_size -> Int4,
        description -> Nullable<Text>,
        price -> Numeric,
        diagonal -> Varchar,
        display_type -> Varchar,
        processor_freq -> Varchar,
        ram -> Varchar,
        video -> Varchar,
        time_without_charge -> Varchar,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    smartphones (id) {
        id -> Int4,
        category_id -> Int4,
        title -> Varchar,
        slug -> Varchar,
        image -> Varchar,
        image_width -> Int4,
        image_height -> Int4,
        image_size -> Int4,
        description -> Nullable<Text>,
        price -> Numeric,
        diagonal -> Varchar,
        display_type -> Varchar,
        resolution -> Varchar,
        accum_volume -> Varchar,
        ram -> Varchar,
        sd -> Bool,
        sd_max_volume -> Nullable<Varchar>,
        main_cam_mp -> Varchar,
        frontal_cam_mp -> Varchar,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    customers (id) {
        id -> Int4,
        user_id -> Int4,
        phone -> Varchar,
        address -> Varchar,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    carts (id) {
        id -> Int4,
        owner_id -> Int4,
        total_products -> Int4,
        final_price -> Numeric,
        in_order -> Bool,
        for_anonymous_user -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    cart_products (id) {
        id -> Int4,
        customer_id -> Int4,
        cart_id -> Int4,
        product_kind -> Varchar,
        product_id -> Int4,
        qty -> Int4,
        final_price -> Numeric,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::joinable!(notebooks -> categories (category_id));
diesel::joinable!(smartphones -> categories (category_id));
diesel::joinable!(carts -> customers (owner_id));
diesel::joinable!(cart_products -> carts (cart_id));
diesel::joinable!(cart_products -> customers (customer_id));

diesel::allow_tables_to_appear_in_same_query!(
    categories,
    notebooks,
    smartphones,
    customers,
    carts,
    cart_products,
);
