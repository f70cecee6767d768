//! game-l10n
//!
//! Per-language string tables, device-language resolution and change
//! notification for game UIs. Construct a [`LocalizationSession`] over a
//! [`TableCollection`] at startup, hand clones of the handle to your UI, and
//! let [`widget::LocalizedLabel`] keep text and fonts current across language
//! switches.

pub mod bundle;
pub mod font;
pub mod format;
pub mod language;
pub mod session;
pub mod table;
pub mod widget;

pub use font::{
    FontId,
    font_for_language,
};
pub use format::FormatError;
pub use language::Language;
pub use session::{
    LocalizationSession,
    Subscription,
};
pub use table::{
    StringTable,
    TableCollection,
};
