//! Entity models and request payloads

pub mod cart;
pub mod catalog;
pub mod order;
pub mod user;

pub use cart::{CartAdd, CartLineDetail};
pub use catalog::{Category, CategoryCreate, Product, ProductCreate, ProductUpdate};
pub use order::{
    Order, OrderCreate, OrderCreated, OrderDetail, OrderItem, OrderStatus, OrderUpdate,
};
pub use user::{User, UserLogin, UserRegister};
