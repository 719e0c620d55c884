//! # weft-edit: Modal text-editing engine for weft
//!
//! The engine behind the `EditBox` control:
//!
//! - **[`cell`]**: `CharCell`, one character plus its highlight state
//! - **[`position`]**: `Position` (line, col), 0-indexed
//! - **[`backend`]**: the `TextBackend` trait the controller edits through
//! - **[`line_buffer`]**: `LineBuffer`, the line-vector backend
//! - **[`highlight`]**: quote/escape tracking and keyword/type coloring
//! - **[`word`]**: delimiter classes and `w`/`b`/`cw` motions
//! - **[`mode`]**: Command, Insert and VisualLine modes
//! - **[`chord`]**: multi-key commands (`dd`, `cw`, `gg`)
//! - **[`clipboard`]**: line-wise yank storage
//! - **[`viewport`]**: soft-wrap row arithmetic and scroll clamping
//! - **[`options`]**: `EditOptions` and the color `Palette`
//! - **[`editbox`]**: `EditBox`, the modal controller tying it together

pub mod backend;
pub mod cell;
pub mod chord;
pub mod clipboard;
pub mod editbox;
pub mod error;
pub mod highlight;
pub mod line_buffer;
pub mod mode;
pub mod options;
pub mod position;
pub mod viewport;
pub mod word;

pub use backend::{ClampLimit, CursorSlot, Slot, TextBackend};
pub use cell::{CharCell, QuoteKind};
pub use editbox::EditBox;
pub use error::EditError;
pub use highlight::{Dialect, TokenClass};
pub use line_buffer::LineBuffer;
pub use mode::Mode;
pub use options::{EditOptions, Palette};
pub use position::Position;
