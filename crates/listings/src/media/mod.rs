pub mod item;
pub mod media_type;
pub mod site;

pub use item::{Game, GameInfo, Host, Stream, Video};
pub use media_type::MediaType;
pub use site::Site;
