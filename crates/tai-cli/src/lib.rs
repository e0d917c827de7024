//! Interactive terminal harness for the dispatch controller.
//!
//! Drives the real [`tai_session::DispatchController`] against the small
//! built-in [`demo::DemoEngine`], rendering the session state the way the
//! host IME would: marked preview, committed text, candidate page.

pub mod app;
pub mod demo;
pub mod trace_init;
