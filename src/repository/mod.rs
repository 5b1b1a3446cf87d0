//! Data access layer (Repository pattern)
//!
//! One repository per collection; each is a thin accessor over the
//! schemaless document store. Mutating operations return the driver's
//! result structs so handlers can surface the write outcome.

pub mod cart;
pub mod menu;
pub mod payment;
pub mod review;
pub mod user;

pub use cart::CartRepository;
pub use menu::MenuRepository;
pub use payment::PaymentRepository;
pub use review::ReviewRepository;
pub use user::UserRepository;

/// Collection names in the bistro database
pub mod collections {
    pub const MENU: &str = "menu";
    pub const REVIEWS: &str = "reviews";
    pub const CARTS: &str = "carts";
    pub const USERS: &str = "users";
    pub const PAYMENTS: &str = "payments";
}
