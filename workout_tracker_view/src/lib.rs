pub mod collaborators;
pub mod config;
pub mod event;
pub mod presentation;
mod reconciler;

pub use collaborators::*;
pub use config::ViewConfig;
pub use event::{event_channel, EventQueue, EventSink, ViewEvent};
pub use presentation::{ListEntry, Popup, PopupStyle, Stat};
pub use reconciler::*;
