//! Transactional email.
//!
//! Account emails are rendered from HTML templates and handed to a
//! [`Mailer`]. Production uses [`Mailgun`]; development and tests use
//! the in-memory [`Outbox`].
//!
//! - [`Mail`] — A rendered message
//! - [`Mailer`] — Delivery transport
//! - [`Postman`] — Renders the account letters and sends them
mod mail;
mod mailer;
mod mailgun;
mod outbox;
mod postman;
mod template;

pub use mail::*;
pub use mailer::*;
pub use mailgun::*;
pub use outbox::*;
pub use postman::*;
pub use template::*;
