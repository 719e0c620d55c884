// SPDX-License-Identifier: MIT
//
// weft-term: the terminal layer of the weft widget toolkit.
//
// Everything a control needs in order to appear on screen and react to the
// keyboard lives here: colored cells and the frame buffer they are painted
// into, the `DrawTarget` abstraction with its scoped and scrolled views,
// a byte-level input decoder that turns escape sequences into key events,
// and the raw-mode terminal plus event loop that drive a whole application.
//
// Controls never talk to the terminal directly. They paint into a
// `DrawTarget` handed to them by their container, and the event loop diffs
// the finished frame against the previous one before writing anything out.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod event_loop;
pub mod input;
pub mod screen;
pub mod surface;
pub mod terminal;
