//! # verity-workflow
//!
//! The layer a form renderer talks to. It validates submitted fields and
//! uploads, stores files, calls the task repository, and answers with a
//! [`request::Reply`] the renderer can display. Form clearing is signalled
//! through `Reply::Ack { reset_form: true }`; the controller keeps no UI state.

pub mod controller;
pub mod error;
pub mod forms;
pub mod request;

pub use controller::WorkflowController;
pub use error::WorkflowError;
pub use request::{Reply, Request};
