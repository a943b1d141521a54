// vitrine_core/src/model/mod.rs

//! Domain types shared by the client, the feed and the local stores.
//! All wire-facing structs deserialize straight from the backend's JSON rows.

pub mod ad;
pub mod category;
pub mod product;
pub mod session;

pub use ad::Ad;
pub use category::{category_icon, category_name, parse_category_param, Category, CATEGORIES};
pub use product::{Condition, NewProduct, Product, ProductSummary, SellerStats, WishlistEntry};
pub use session::Session;
