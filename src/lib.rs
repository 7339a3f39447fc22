//! term-balloon: a contextual balloon toolbar layer for terminal text
//! editors.
//!
//! The crate implements the focus-delegation / keystroke-handoff protocol
//! between a floating toolbar and an editable surface:
//!
//! - [`focus::FocusArbiter`] tracks named focusable regions and derives an
//!   edge-triggered "is anything focused" aggregate;
//! - [`toolbar::BalloonToolbarController`] decides when the balloon is
//!   shown or hidden, making the toolbar visible before focusing it and
//!   returning focus to the editable before hiding;
//! - [`editor_ui::BalloonEditorUi`] composes the two with an editable
//!   surface, a toolbar view, and keystroke routing (Alt+F10 shows, Esc
//!   hides).
//!
//! All transitions run synchronously on one event queue; there is no
//! parallelism in the protocol.

pub mod drivers;
pub mod editor_ui;
pub mod event_loop;
pub mod focus;
pub mod keybindings;
pub mod surface;
pub mod terminal;
pub mod theme;
pub mod toolbar;
pub mod tracing_sub;
pub mod ui;
