//! Renderer and input boundaries of the tracking core.

pub mod input;
pub mod renderer;

pub use input::{spawn_stdin_input, ChannelInput, InputEvent, InputSource, ScriptedInput};
pub use renderer::{CsvRenderer, LogRenderer, NullRenderer, Renderer};
