// Request/Response models
pub mod common;
pub mod payment;
pub mod purchase;
pub mod view;
