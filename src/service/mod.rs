//! Request/response surface of the logger.

pub mod action;
pub mod clock;
mod error;
pub mod server;
pub mod session;

pub use action::{ActionForm, ActionHandler, ActionRequest, ActionResponse, Status};
pub use clock::{Clock, SystemClock};
pub use session::{AuthState, SessionStore};
