//! Render-scope memoization.
//!
//! A [`MemoSlot`] caches the result of a pure computation together with the
//! key it was computed from. It is the equivalent of a `use_memo` call with
//! an explicit dependency list: the computation re-runs only when the key
//! changes.

use std::cell::RefCell;

/// A single memoized value keyed by its inputs.
#[derive(Debug)]
pub struct MemoSlot<K, V> {
	entry: RefCell<Option<(K, V)>>,
}

impl<K, V> Default for MemoSlot<K, V> {
	fn default() -> Self {
		Self {
			entry: RefCell::new(None),
		}
	}
}

impl<K, V> MemoSlot<K, V>
where
	K: PartialEq,
	V: Clone,
{
	/// Creates an empty slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached value for `key`, computing it with `f` when the
	/// slot is empty or was filled for a different key.
	///
	/// `f` must not access this slot.
	pub fn get_or_compute<F>(&self, key: K, f: F) -> V
	where
		F: FnOnce(&K) -> V,
	{
		if let Some((cached_key, value)) = self.entry.borrow().as_ref() {
			if *cached_key == key {
				return value.clone();
			}
		}

		let value = f(&key);
		*self.entry.borrow_mut() = Some((key, value.clone()));
		value
	}

	/// Returns true if the slot holds a value computed for `key`.
	pub fn is_cached(&self, key: &K) -> bool {
		self.entry
			.borrow()
			.as_ref()
			.is_some_and(|(cached_key, _)| cached_key == key)
	}

	/// Drops the cached value so the next access recomputes.
	pub fn invalidate(&self) {
		self.entry.borrow_mut().take();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;
	use std::rc::Rc;

	#[rstest]
	fn test_same_key_computes_once() {
		let slot = MemoSlot::new();
		let calls = Cell::new(0);

		let compute = |k: &i32| {
			calls.set(calls.get() + 1);
			k * 2
		};

		assert_eq!(slot.get_or_compute(21, compute), 42);
		assert_eq!(slot.get_or_compute(21, compute), 42);
		assert_eq!(calls.get(), 1);
		assert!(slot.is_cached(&21));
	}

	#[rstest]
	fn test_key_change_recomputes() {
		let slot = MemoSlot::new();
		let calls = Cell::new(0);

		let compute = |k: &String| {
			calls.set(calls.get() + 1);
			k.len()
		};

		assert_eq!(slot.get_or_compute("a".to_string(), compute), 1);
		assert_eq!(slot.get_or_compute("abc".to_string(), compute), 3);
		assert_eq!(calls.get(), 2);
		assert!(!slot.is_cached(&"a".to_string()));
	}

	#[rstest]
	fn test_shared_value_identity() {
		let slot: MemoSlot<&str, Rc<Vec<i32>>> = MemoSlot::new();
		let first = slot.get_or_compute("k", |_| Rc::new(vec![1, 2, 3]));
		let second = slot.get_or_compute("k", |_| Rc::new(vec![1, 2, 3]));
		assert!(Rc::ptr_eq(&first, &second));
	}

	#[rstest]
	fn test_invalidate() {
		let slot = MemoSlot::new();
		slot.get_or_compute(1, |_| "one");
		slot.invalidate();
		assert!(!slot.is_cached(&1));
		assert_eq!(slot.get_or_compute(1, |_| "uno"), "uno");
	}
}
