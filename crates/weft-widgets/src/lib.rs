//! # weft-widgets: Controls for weft
//!
//! - **[`control`]**: the `Control` trait every widget implements
//! - **[`label`]**, **[`checkbox`]**, **[`button`]**, **[`textbox`]**,
//!   **[`detail_view`]**: the stock controls
//! - **[`edit_box`]**: `Control` for the modal `EditBox` from `weft-edit`
//! - **[`container`]**: focus cycling, key bindings, and the main loop

pub mod button;
pub mod checkbox;
pub mod container;
pub mod control;
pub mod detail_view;
pub mod edit_box;
pub mod label;
pub mod textbox;

pub use button::Button;
pub use checkbox::CheckBox;
pub use container::{Container, KeyBinding, KeyBindings, run};
pub use control::{Control, Style};
pub use detail_view::{Column, DetailView, RowColors};
pub use label::Label;
pub use textbox::TextBox;
