//! UI Components for HoloCard.

mod card_view;
mod head_preview;
mod install_banner;
mod qr_code;

pub use card_view::CardView;
pub use head_preview::HeadPreview;
pub use install_banner::{InstallBanner, InstallDialog};
pub use qr_code::CardQr;
