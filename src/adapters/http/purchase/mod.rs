//! HTTP adapter for chapter purchase endpoints.
//!
//! - `GET /api/pricing/chapters` - Price table
//! - `GET /api/editions/:edition_id/chapter-credits` - Options and quotes
//! - `GET /api/editions/:edition_id/chapter-credits/quote` - One quote
//! - `POST /api/editions/:edition_id/chapter-credits/checkout` - Start checkout

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{CheckoutRedirects, PurchaseAppState};
pub use routes::purchase_routes;
