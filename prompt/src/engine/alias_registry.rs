// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::HashMap,
          sync::{Arc, OnceLock, PoisonError}};

use strum_macros::{Display, EnumString};

use crate::{KeyPress, SpecialKey, StdRwLock, key_press};

/// The fixed vocabulary of navigation actions that the prompt engine understands. Raw
/// keys are translated into these, either directly (arrow keys, space) or via the
/// [`AliasRegistry`] (`k`, `j`, `h`, `l`, `Ctrl+C`, `Esc`, and whatever the app adds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Space,
    Cancel,
}

impl Action {
    /// Keys that name an action directly. These work in every prompt, whether it tracks
    /// a text buffer or not.
    #[must_use]
    pub fn from_direct_key(key_press: &KeyPress) -> Option<Action> {
        if key_press.printable_char() == Some(' ') {
            return Some(Action::Space);
        }
        match key_press.special_key()? {
            SpecialKey::Up => Some(Action::Up),
            SpecialKey::Down => Some(Action::Down),
            SpecialKey::Left => Some(Action::Left),
            SpecialKey::Right => Some(Action::Right),
            _ => None,
        }
    }
}

/// Mapping from raw keys to [`Action`]s.
///
/// - Cloning is cheap, clones share the same table.
/// - Entries are only ever added, never replaced or removed. The first registration for
///   a key wins, so an app layering its own aliases on top can't clobber the defaults.
/// - [`AliasRegistry::global()`] is the process wide instance that prompts use unless
///   one is injected via [`crate::PromptOptions::aliases`].
///
/// ```
/// use r3bl_prompt::{Action, AliasRegistry, key_press};
///
/// let registry = AliasRegistry::new();
/// registry.set_aliases([(key_press!(@char 'k'), Action::Down)]);
/// assert_eq!(registry.resolve(&key_press!(@char 'k')), Some(Action::Up));
/// ```
#[derive(Debug, Clone)]
pub struct AliasRegistry {
    table: Arc<StdRwLock<HashMap<KeyPress, Action>>>,
}

static GLOBAL_ALIAS_REGISTRY: OnceLock<AliasRegistry> = OnceLock::new();

/// vi-style movement plus the two ways to bail out.
#[must_use]
pub fn default_aliases() -> [(KeyPress, Action); 6] {
    [
        (key_press!(@char 'k'), Action::Up),
        (key_press!(@char 'j'), Action::Down),
        (key_press!(@char 'h'), Action::Left),
        (key_press!(@char 'l'), Action::Right),
        (KeyPress::ctrl('c'), Action::Cancel),
        (key_press!(@special SpecialKey::Esc), Action::Cancel),
    ]
}

impl Default for AliasRegistry {
    fn default() -> Self { Self::new() }
}

impl AliasRegistry {
    /// A fresh registry seeded with [`default_aliases()`], not shared with
    /// [`AliasRegistry::global()`].
    #[must_use]
    pub fn new() -> Self {
        let it = Self {
            table: Arc::new(StdRwLock::new(HashMap::new())),
        };
        it.set_aliases(default_aliases());
        it
    }

    /// The process wide registry. It is seeded the first time it is accessed.
    #[must_use]
    pub fn global() -> Self { GLOBAL_ALIAS_REGISTRY.get_or_init(Self::new).clone() }

    /// Add aliases for keys that don't have one yet. Keys that already resolve to an
    /// action are skipped.
    pub fn set_aliases(&self, pairs: impl IntoIterator<Item = (KeyPress, Action)>) {
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        for (key_press, action) in pairs {
            if let Some(existing) = table.get(&key_press) {
                tracing::debug!(
                    message = "Alias already registered, skipping",
                    ?key_press,
                    %existing,
                    ignored = %action
                );
                continue;
            }
            tracing::debug!(message = "Alias registered", ?key_press, %action);
            table.insert(key_press, action);
        }
    }

    #[must_use]
    pub fn resolve(&self, key_press: &KeyPress) -> Option<Action> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key_press)
            .copied()
    }

    /// `true` if any of the given keys resolves to `action`.
    #[must_use]
    pub fn is_alias_for(&self, key_presses: &[KeyPress], action: Action) -> bool {
        key_presses
            .iter()
            .any(|key_press| self.resolve(key_press) == Some(action))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}
