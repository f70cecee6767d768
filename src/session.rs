//! The localization session: active language, lookup and change fan-out.

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::{
    Rc,
    Weak,
};

use crate::format::{
    FormatError,
    format_positional,
};
use crate::language::Language;
use crate::table::TableCollection;

/// Callback invoked with the new language after an accepted switch.
type ChangeHandler = Box<dyn FnMut(Language)>;

/// A registered change handler.
struct Subscriber {
    /// Identity used for removal.
    id: u64,
    /// The callback itself.
    handler: ChangeHandler,
}

/// Shared state behind a [`LocalizationSession`] handle.
struct SessionInner {
    /// Immutable-after-build language tables.
    tables: TableCollection,
    /// Active language; `None` until the startup transition.
    current: Option<Language>,
    /// Change subscribers in subscription order.
    subscribers: Vec<Subscriber>,
    /// Ids unsubscribed while a fan-out was in flight.
    pending_removals: Vec<u64>,
    /// Number of fan-outs currently on the stack; nested `set_language`
    /// calls from handlers push this above one.
    dispatch_depth: usize,
    /// Next subscription id.
    next_id: u64,
}

/// Single source of truth for the active language and key lookup.
///
/// The handle is cheap to clone; clones share one session. Construct one at
/// application start and hand clones to every consumer instead of going
/// through a global. Single-threaded by design: every operation completes
/// synchronously before returning.
///
/// # Examples
/// ```
/// use game_l10n::language::Language;
/// use game_l10n::session::LocalizationSession;
/// use game_l10n::table::TableCollection;
///
/// let session = LocalizationSession::new(TableCollection::builtin());
/// session.activate(Language::English, Language::Korean);
/// assert_eq!(session.text("UI_SHOP_BUY"), "Buy");
/// ```
#[derive(Clone)]
pub struct LocalizationSession {
    /// Shared session state.
    inner: Rc<RefCell<SessionInner>>,
}

/// A weak session handle, for consumers that must not keep the session alive
/// (change handlers in particular, which the session itself owns).
#[derive(Clone)]
pub struct WeakSession {
    /// Weak counterpart of [`LocalizationSession::inner`].
    inner: Weak<RefCell<SessionInner>>,
}

impl WeakSession {
    /// Upgrades back to a full handle if the session is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<LocalizationSession> {
        self.inner.upgrade().map(|inner| LocalizationSession { inner })
    }
}

/// Guard for a change subscription; dropping it unsubscribes.
///
/// Tie this to whatever scope makes the consumer visible, so the handler can
/// never outlive the consumer it updates.
#[must_use = "dropping the Subscription immediately would unsubscribe right away"]
pub struct Subscription {
    /// Session the handler is registered with.
    session: Weak<RefCell<SessionInner>>,
    /// Id of the registered handler.
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.session.upgrade() else {
            return;
        };
        let mut inner = inner.borrow_mut();
        inner.subscribers.retain(|subscriber| subscriber.id != self.id);
        if inner.dispatch_depth > 0 {
            // The handler may sit in an in-flight snapshot; make sure it is
            // not merged back once the outermost fan-out completes.
            let id = self.id;
            inner.pending_removals.push(id);
        }
    }
}

impl LocalizationSession {
    /// Creates an uninitialized session over `tables`.
    ///
    /// No language is active until [`activate`](Self::activate) runs; lookups
    /// before that return the `[NO_TABLE::..]` sentinel.
    #[must_use]
    pub fn new(tables: TableCollection) -> Self {
        let inner = SessionInner {
            tables,
            current: None,
            subscribers: Vec::new(),
            pending_removals: Vec::new(),
            dispatch_depth: 0,
            next_id: 0,
        };
        Self { inner: Rc::new(RefCell::new(inner)) }
    }

    /// Startup transition: resolves the device-reported language against the
    /// tables and applies the result, without notifying (nothing has had a
    /// chance to subscribe yet).
    ///
    /// If even the resolved language has no table, the session stays
    /// uninitialized and a warning is logged.
    pub fn activate(&self, device_language: Language, fallback: Language) {
        let resolved = self.resolve_language(device_language, fallback);
        let mut inner = self.inner.borrow_mut();
        if inner.tables.has_language(resolved) {
            inner.current = Some(resolved);
            tracing::info!("Language applied: {}", resolved.code());
        } else {
            tracing::warn!(
                "No string table for fallback language {}; session stays uninitialized",
                resolved.code()
            );
        }
    }

    /// Returns `requested` if a table exists for it, else `fallback`.
    ///
    /// Total given a supported fallback; used for the startup resolution and
    /// reusable for language pickers.
    #[must_use]
    pub fn resolve_language(&self, requested: Language, fallback: Language) -> Language {
        if self.inner.borrow().tables.has_language(requested) { requested } else { fallback }
    }

    /// The active language, or `None` before activation.
    #[must_use]
    pub fn current_language(&self) -> Option<Language> {
        self.inner.borrow().current
    }

    /// Whether a table exists for `language`.
    #[must_use]
    pub fn has_language(&self, language: Language) -> bool {
        self.inner.borrow().tables.has_language(language)
    }

    /// Languages a table exists for, sorted by code.
    #[must_use]
    pub fn available_languages(&self) -> Vec<Language> {
        self.inner.borrow().tables.languages()
    }

    /// Switches the active language.
    ///
    /// Idempotent: switching to the already-active language does nothing and
    /// notifies nobody. Switching to a language without a table is rejected
    /// with a warning, state unchanged. An accepted switch notifies every
    /// subscriber registered before the call, synchronously and in
    /// subscription order, with the new language.
    pub fn set_language(&self, target: Language) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.current == Some(target) {
                return;
            }
            if !inner.tables.has_language(target) {
                tracing::warn!("No string table for {}; language unchanged", target.code());
                return;
            }
            inner.current = Some(target);
            tracing::info!("Language applied: {}", target.code());
        }
        self.notify(target);
    }

    /// Looks up the localized text for `key` in the active table.
    ///
    /// Total: missing data degrades to a visible sentinel embedding the key
    /// (`[NO_TABLE::..]` before activation, `[MISSING_KEY::..]` for an
    /// untranslated key) so it is caught on screen during QA rather than
    /// crashing a render path.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        let inner = self.inner.borrow();
        let Some(table) = inner.current.and_then(|lang| inner.tables.get(lang)) else {
            return format!("[NO_TABLE::{key}]");
        };
        table.get(key).map_or_else(
            || {
                tracing::warn!("Missing translation for key {key:?}");
                format!("[MISSING_KEY::{key}]")
            },
            ToString::to_string,
        )
    }

    /// Looks up `key` and interpolates positional arguments into it.
    ///
    /// Lookup failures degrade to sentinels exactly like [`text`](Self::text);
    /// a template that does not match the supplied arguments is a
    /// data-authoring bug and propagates as a [`FormatError`].
    pub fn text_with_args(
        &self,
        key: &str,
        args: &[&dyn Display],
    ) -> Result<String, FormatError> {
        format_positional(&self.text(key), args)
    }

    /// Registers a change handler, invoked with the new language after every
    /// accepted switch. The returned guard unsubscribes on drop.
    pub fn subscribe(&self, handler: impl FnMut(Language) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.push(Subscriber { id, handler: Box::new(handler) });
        Subscription { session: Rc::downgrade(&self.inner), id }
    }

    /// Downgrades to a handle that does not keep the session alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakSession {
        WeakSession { inner: Rc::downgrade(&self.inner) }
    }

    /// Synchronous fan-out to every subscriber registered before the switch.
    ///
    /// The subscriber list is moved out for the duration of the dispatch so
    /// handlers can re-enter the session (lookups, late subscribes,
    /// unsubscribes) without tripping the `RefCell`.
    fn notify(&self, language: Language) {
        let mut active = {
            let mut inner = self.inner.borrow_mut();
            inner.dispatch_depth += 1;
            std::mem::take(&mut inner.subscribers)
        };

        for subscriber in &mut active {
            (subscriber.handler)(language);
        }

        let mut inner = self.inner.borrow_mut();
        inner.dispatch_depth -= 1;
        // Handlers registered during the fan-out landed in `inner.subscribers`;
        // keep original subscription order with the snapshot first.
        let late = std::mem::replace(&mut inner.subscribers, active);
        inner.subscribers.extend(late);
        // Removals recorded while any fan-out was on the stack are applied
        // only once the outermost one has merged its snapshot back; a nested
        // fan-out sweeping early would let the outer merge reinstate a
        // subscriber whose guard was already dropped.
        if inner.dispatch_depth == 0 {
            let removals = std::mem::take(&mut inner.pending_removals);
            if !removals.is_empty() {
                inner.subscribers.retain(|subscriber| !removals.contains(&subscriber.id));
            }
        }
    }
}

impl std::fmt::Debug for LocalizationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("LocalizationSession")
            .field("current", &inner.current)
            .field("languages", &inner.tables.languages())
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl std::fmt::Debug for WeakSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakSession").field("alive", &(self.inner.strong_count() > 0)).finish()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
