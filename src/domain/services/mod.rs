mod app_state;
mod bubble;
mod bubble_list;
mod conversation_store;
pub mod events;
mod scroll;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use conversation_store::*;
pub use scroll::*;
