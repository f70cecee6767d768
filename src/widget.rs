//! Host-agnostic localized text widget.
//!
//! [`LocalizedLabel`] binds a translation key to a host text widget: it
//! refreshes eagerly when shown, tracks language changes while visible, and
//! swaps the font per language. The host only has to implement
//! [`TextSurface`] for its render widget and call [`show`](LocalizedLabel::show)
//! / [`hide`](LocalizedLabel::hide) from its visibility hooks.

use std::cell::{
    Ref,
    RefCell,
};
use std::rc::Rc;

use crate::font::{
    FontId,
    font_for_language,
};
use crate::session::{
    LocalizationSession,
    Subscription,
};

/// The narrow outbound interface to a host text widget.
pub trait TextSurface {
    /// Replaces the displayed text.
    fn set_text(&mut self, text: &str);
    /// Replaces the displayed font.
    fn set_font(&mut self, font: FontId);
}

/// Whether the label's font follows the active language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontPolicy {
    /// Re-apply the per-language font on every language change.
    #[default]
    Auto,
    /// Keep whatever font the host configured.
    Fixed,
}

/// Mutable label state shared with the change handler.
struct LabelState<S> {
    /// Translation key currently bound.
    key: String,
    /// Font behavior on language change.
    font_policy: FontPolicy,
    /// Set once [`LocalizedLabel::set_literal`] opts the label out of
    /// localization; cleared by [`LocalizedLabel::set_key`].
    literal: bool,
    /// The host widget.
    surface: S,
}

/// A text widget bound to a translation key.
pub struct LocalizedLabel<S: TextSurface> {
    /// Shared with the subscribed change handler.
    state: Rc<RefCell<LabelState<S>>>,
    /// Session the label reads from.
    session: LocalizationSession,
    /// Live while the label is visible.
    subscription: Option<Subscription>,
}

impl<S: TextSurface + 'static> LocalizedLabel<S> {
    /// Creates a hidden label bound to `key`.
    pub fn new(
        session: LocalizationSession,
        key: impl Into<String>,
        font_policy: FontPolicy,
        surface: S,
    ) -> Self {
        let state =
            LabelState { key: key.into(), font_policy, literal: false, surface };
        Self { state: Rc::new(RefCell::new(state)), session, subscription: None }
    }

    /// Makes the label visible: refreshes the text once, then tracks language
    /// changes until [`hide`](Self::hide). Idempotent while visible.
    pub fn show(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        self.refresh();

        let state = Rc::clone(&self.state);
        // The handler lives inside the session, so it must not hold the
        // session alive in turn.
        let session = self.session.downgrade();
        self.subscription = Some(self.session.subscribe(move |language| {
            let Some(session) = session.upgrade() else {
                return;
            };
            let mut state = state.borrow_mut();
            if !state.literal {
                let text = session.text(&state.key);
                state.surface.set_text(&text);
            }
            if state.font_policy == FontPolicy::Auto {
                state.surface.set_font(font_for_language(language));
            }
        }));
    }

    /// Hides the label, releasing its subscription. Every path that ends
    /// visibility must come through here or through drop.
    pub fn hide(&mut self) {
        self.subscription = None;
    }

    /// Whether the label currently tracks language changes.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.subscription.is_some()
    }

    /// Writes `text` directly and opts the label out of localization updates
    /// until [`set_key`](Self::set_key) rebinds it. The font policy still
    /// applies on language changes.
    pub fn set_literal(&mut self, text: &str) {
        let mut state = self.state.borrow_mut();
        state.literal = true;
        state.surface.set_text(text);
    }

    /// Rebinds the label to `key`, re-enabling localization, and refreshes
    /// immediately.
    pub fn set_key(&mut self, key: impl Into<String>) {
        {
            let mut state = self.state.borrow_mut();
            state.key = key.into();
            state.literal = false;
        }
        self.refresh();
    }

    /// Read access to the host widget.
    #[must_use]
    pub fn surface(&self) -> Ref<'_, S> {
        Ref::map(self.state.borrow(), |state| &state.surface)
    }

    /// Re-applies the localized text for the bound key.
    fn refresh(&self) {
        let mut state = self.state.borrow_mut();
        if state.literal {
            return;
        }
        let text = self.session.text(&state.key);
        state.surface.set_text(&text);
    }
}

impl<S: TextSurface> std::fmt::Debug for LocalizedLabel<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("LocalizedLabel")
            .field("key", &state.key)
            .field("font_policy", &state.font_policy)
            .field("literal", &state.literal)
            .field("visible", &self.subscription.is_some())
            .finish()
    }
}
