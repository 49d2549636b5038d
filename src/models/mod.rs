pub mod affiliate_link;
pub mod equipment;
pub mod maintenance_task;
pub mod maintenance_template;
pub mod product;

pub use product::Product;
