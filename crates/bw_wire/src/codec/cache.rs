use alloc::string::String;

use bw_utils::hash::{HashMap, HashSet};

use crate::info::Type;

/// The per-operation memory of a [`TypeCodec`](super::TypeCodec).
///
/// A writer records the token chosen for each type and the set of tokens
/// already claimed, a reader records the type each token resolved to.
/// One cache serves exactly one document write or one document read and
/// is dropped afterwards.
#[derive(Debug, Clone, Default)]
pub struct TypeCache {
    tokens: HashMap<Type, String>,
    claimed: HashSet<String>,
    types: HashMap<String, Type>,
}

impl TypeCache {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the token cached for a type on the write side.
    #[inline]
    pub fn token(&self, ty: &Type) -> Option<&str> {
        self.tokens.get(ty).map(String::as_str)
    }

    /// Returns `true` if a type already writes itself as `token`.
    #[inline]
    pub fn is_claimed(&self, token: &str) -> bool {
        self.claimed.contains(token)
    }

    pub(crate) fn insert_token(&mut self, ty: Type, token: String) {
        self.claimed.insert(token.clone());
        self.tokens.insert(ty, token);
    }

    /// Returns the type a token resolved to on the read side.
    #[inline]
    pub fn get(&self, token: &str) -> Option<&Type> {
        self.types.get(token)
    }

    /// Records a resolution, keeping the first type seen for a token.
    pub(crate) fn insert_type(&mut self, token: &str, ty: &Type) {
        if !self.types.contains_key(token) {
            self.types.insert(token.into(), ty.clone());
        }
    }

    /// Returns the number of entries on both sides.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len() + self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.types.is_empty()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
        self.claimed.clear();
        self.types.clear();
    }
}
