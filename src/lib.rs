pub mod catalog;
pub mod db;
pub mod error;
pub mod mock_data;
pub mod models;
