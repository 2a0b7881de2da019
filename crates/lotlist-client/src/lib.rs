pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::ParkingApiClient;
pub use error::ClientError;
pub use normalize::normalize_lots;
pub use types::{CityResponse, NoticeResponse, RawCoords, RawLot};
