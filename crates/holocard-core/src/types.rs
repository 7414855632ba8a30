//! Core types for HoloCard

pub mod card;
pub mod variant;

pub use card::{AboutInfo, CardResponse, ContactInfo, DigitalCard, PersonalInfo, SocialNetwork};
pub use variant::CardVariant;
