//! Editor use-case layer.
//!
//! # Responsibility
//! - Wire store, history, clipboard, selection and node view into one
//!   explicitly owned session object.
//! - Keep UI layers decoupled from the individual components.

pub mod editor_session;
