pub mod clipboard;
pub mod codec;
pub mod form;
pub mod gui;
pub mod logging;
pub mod notify;
pub mod overlay;
pub mod samples;
pub mod session;
pub mod settings;
pub mod submission;
