//! Editor module for Inkpanel
//!
//! This module contains the editor panel and the state it owns: the link
//! dialog, the media URL prompt, deferred focus handling and the keyboard
//! bindings of the document surface.

mod block_style;
mod handle;
mod input;
mod link;
mod media;
mod notify;
mod panel;
mod schedule;

pub use block_style::{block_style_class, BlockStyleClass};
pub use handle::EditorHandle;
pub use input::{key_binding, motion_binding, surface_events, SurfaceEvent};
pub use link::{validate_link_url, LinkDescriptor, LinkDialog};
pub use media::{media_block_for, MediaBlock, MediaDescriptor, PromptKey, UrlPrompt};
pub use notify::{Notification, NotificationKind, ShowNotification};
pub use panel::{EditorPanel, EditorProps, DEFAULT_MAX_LIST_DEPTH};
pub use schedule::{AfterRender, DeferredTask, FocusTarget, TaskId};
