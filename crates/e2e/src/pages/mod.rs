//! Typed page objects
//!
//! One type per screen, exposing named locators and step builders
//! instead of ad hoc selector chains inside scenario bodies. Page
//! objects only compose [`Step`](crate::scenario::Step) sequences; they
//! never touch the browser, so a whole flow still runs as one session.

pub mod login;

pub use login::LoginPage;
