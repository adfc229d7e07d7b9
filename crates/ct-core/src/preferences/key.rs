use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use super::PreferenceValue;

/// Rust types that can be stored under a [`PreferenceKey`].
pub trait PreferenceType: Sized {
    const KIND: &'static str;

    fn from_value(value: &PreferenceValue) -> Option<Self>;

    fn into_value(self) -> PreferenceValue;
}

impl PreferenceType for bool {
    const KIND: &'static str = "bool";

    fn from_value(value: &PreferenceValue) -> Option<Self> {
        match value {
            PreferenceValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> PreferenceValue {
        PreferenceValue::Bool(self)
    }
}

impl PreferenceType for i64 {
    const KIND: &'static str = "int";

    fn from_value(value: &PreferenceValue) -> Option<Self> {
        match value {
            PreferenceValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> PreferenceValue {
        PreferenceValue::Int(self)
    }
}

impl PreferenceType for String {
    const KIND: &'static str = "string";

    fn from_value(value: &PreferenceValue) -> Option<Self> {
        match value {
            PreferenceValue::String(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> PreferenceValue {
        PreferenceValue::String(self)
    }
}

/// Typed name of a preference entry.
pub struct PreferenceKey<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> PreferenceKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for PreferenceKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PreferenceKey<T> {}

impl<T> Debug for PreferenceKey<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PreferenceKey").field(&self.name).finish()
    }
}
