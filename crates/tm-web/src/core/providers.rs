//! Provider scopes wrapped around the root component.
//!
//! # Design
//! - The nesting order is data, so the mounted tree is built by folding over it.
//! - Each scope names the ancestor it reads from; a stack is only valid when every
//!   dependency sits further out.

/// A context boundary wrapped around the root component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderScope {
    /// Shared application store.
    Store,
    /// Waits for persisted state to be restored before rendering children.
    PersistGate,
    /// Translation bundle and text direction.
    Localization,
    /// Browser history routing.
    Navigation,
}

impl ProviderScope {
    /// Scope that must enclose this one.
    #[must_use]
    pub const fn requires(self) -> Option<Self> {
        match self {
            Self::Store => None,
            Self::PersistGate => Some(Self::Store),
            Self::Localization => Some(Self::PersistGate),
            Self::Navigation => Some(Self::Localization),
        }
    }

    /// Stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::PersistGate => "persist_gate",
            Self::Localization => "localization",
            Self::Navigation => "navigation",
        }
    }
}

/// Ordered scopes, outermost first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderStack {
    scopes: Vec<ProviderScope>,
}

impl Default for ProviderStack {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProviderStack {
    /// Store, persistence gate, localization, navigation.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            scopes: vec![
                ProviderScope::Store,
                ProviderScope::PersistGate,
                ProviderScope::Localization,
                ProviderScope::Navigation,
            ],
        }
    }

    /// Build a custom stack, rejecting orders that break a dependency.
    #[must_use]
    pub fn from_scopes(scopes: Vec<ProviderScope>) -> Option<Self> {
        let stack = Self { scopes };
        stack.is_valid().then_some(stack)
    }

    /// Scopes from outermost to innermost.
    #[must_use]
    pub fn scopes(&self) -> &[ProviderScope] {
        &self.scopes
    }

    /// Outermost scope.
    #[must_use]
    pub fn outermost(&self) -> Option<ProviderScope> {
        self.scopes.first().copied()
    }

    /// Scope directly enclosing the root component.
    #[must_use]
    pub fn innermost(&self) -> Option<ProviderScope> {
        self.scopes.last().copied()
    }

    /// Wrap `root` in every scope, applying the innermost scope first so the
    /// result nests outermost-first.
    pub fn wrap<T>(&self, root: T, mut wrap_in: impl FnMut(ProviderScope, T) -> T) -> T {
        self.scopes
            .iter()
            .rev()
            .fold(root, |child, scope| wrap_in(*scope, child))
    }

    /// Every dependency appears before its dependant and no scope repeats.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.scopes.iter().enumerate().all(|(index, scope)| {
            let earlier = &self.scopes[..index];
            !earlier.contains(scope)
                && scope
                    .requires()
                    .is_none_or(|required| earlier.contains(&required))
        })
    }
}
