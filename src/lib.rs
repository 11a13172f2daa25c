pub mod gui;
pub mod logging;
pub mod pad;

pub use pad::SignPad;
