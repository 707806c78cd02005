//! Stable facade for the paginated-message controller.

pub mod action;
mod dispatch;
pub mod error;
pub mod layout;
mod navigator;
mod page;
pub mod registry;
pub mod respond;
pub mod select;
pub mod session;
pub mod transport;

pub use action::{
    ACTION_ID_PREFIX, ActionInput, ActionTrigger, PaginationAction, Transition, default_actions,
};
pub use dispatch::DispatchPlan;
pub use error::{ConfigurationError, DispatchError, PageResolutionError, PaginationError};
pub use layout::{Control, ControlLayout, partition_controls};
pub use navigator::{ActionOutcome, Activation, InputCollector, Navigator};
pub use page::{Page, PageContext, PageFuture, PagePayload};
pub use registry::ActionRegistry;
pub use select::{DefaultPageLabeler, LabelContext, PageLabeler, PageOption};
pub use session::{ComponentEvent, DEFAULT_TIMEOUT_SECS, Notice, PaginationSessions, SessionHost};
pub use transport::{
    InteractionRef, MessageRef, ResponseHandle, ResponseOrigin, Transport, Trigger, TriggerSource,
};
