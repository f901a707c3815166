pub mod events;
pub mod interaction;
pub mod pointer;
pub mod state;

pub use events::{InputEvent, PointerButton};
pub use interaction::{DispatchEffect, dispatch_event};
pub use pointer::PointerState;
pub use state::{FrameBeginReport, ViewState};
