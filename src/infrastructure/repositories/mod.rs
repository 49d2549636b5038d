//! Repository implementations using SeaORM

pub mod affiliate_link_repository;
pub mod product_repository;

pub use affiliate_link_repository::SeaOrmAffiliateLinkRepository;
pub use product_repository::SeaOrmProductRepository;
