//! Presenter - response formatting for both front-ends

pub mod banner;
pub mod response;

pub use banner::{Assessment, Banner};
pub use response::PredictionResponse;
