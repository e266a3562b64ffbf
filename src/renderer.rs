//! Terminal dialog renderers
//!
//! A renderer draws one widget and reports what the user did with it. Three
//! implementations are provided:
//! - [`DialoguerRenderer`]: inline prompts drawn with `dialoguer`
//! - [`DialogProgramRenderer`]: full-screen boxes drawn by `dialog(1)`
//! - [`ScriptedRenderer`]: predefined replies, for tests and automation

pub mod dialoguer;
pub mod interface;
pub mod program;
pub mod scripted;

pub use self::dialoguer::DialoguerRenderer;
pub use interface::{
    ChoiceRenderer, DialogRenderer, DisplayRenderer, Disposition, FileConfig, FileRenderer,
    FormConfig, InputConfig, InputRenderer, ListConfig, MenuConfig, MessageConfig,
    PasswordConfig, TimeConfig,
};
pub use program::DialogProgramRenderer;
pub use scripted::{ScriptedReply, ScriptedRenderer};
