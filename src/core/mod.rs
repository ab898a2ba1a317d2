//! Core module containing the order domain and the pipeline that places orders

pub mod error;
pub mod intake;
pub mod order;
pub mod product;
pub mod request;
pub mod service;

pub use error::{GENERIC_FAILURE_MESSAGE, OrderError};
pub use intake::OrderIntake;
pub use order::{Order, OrderResponse};
pub use product::{Product, ProductInfo, catalogue};
pub use request::{OrderDetails, OrderRequest};
pub use service::{Notifier, OrderLog};
