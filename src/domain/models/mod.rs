mod conversation;
mod event;
mod message;
mod origin;
mod session;
mod status;
mod suggestion;
mod textarea;

pub use conversation::*;
pub use event::*;
pub use message::*;
pub use origin::*;
pub use session::*;
pub use status::*;
pub use suggestion::*;
pub use textarea::*;
