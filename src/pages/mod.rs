//! Page components for HoloCard.

mod card;
mod landing;
mod not_found;

pub use card::CardScreen;
pub use landing::Landing;
pub use not_found::NotFoundPage;
