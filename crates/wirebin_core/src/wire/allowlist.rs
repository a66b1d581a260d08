use std::collections::BTreeSet;

/// Descriptor registered in every fresh [`AllowList`].
pub const DECIMAL_DESCRIPTOR: &str = "decimal.Decimal";

/// Policy deciding which complex-object descriptors may reach the fallback codec.
///
/// Enforcement defaults to on. When off, every descriptor passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
	enforced: bool,
	registered: BTreeSet<Box<str>>,
}

impl Default for AllowList {
	fn default() -> Self {
		Self::empty().with(DECIMAL_DESCRIPTOR)
	}
}

impl AllowList {
	/// Enforcing list with nothing registered.
	pub fn empty() -> Self {
		Self {
			enforced: true,
			registered: BTreeSet::new(),
		}
	}

	/// Non-enforcing list: every descriptor is admitted.
	pub fn permissive() -> Self {
		Self {
			enforced: false,
			..Self::default()
		}
	}

	/// Builder form of [`register`](Self::register).
	pub fn with(mut self, descriptor: impl Into<Box<str>>) -> Self {
		self.register(descriptor);
		self
	}

	/// Register a descriptor. Returns `false` if it was already present.
	pub fn register(&mut self, descriptor: impl Into<Box<str>>) -> bool {
		self.registered.insert(descriptor.into())
	}

	/// Remove a descriptor. Returns `false` if it was not present.
	pub fn unregister(&mut self, descriptor: &str) -> bool {
		self.registered.remove(descriptor)
	}

	/// Toggle enforcement.
	pub fn set_enforced(&mut self, enforced: bool) {
		self.enforced = enforced;
	}

	/// Whether enforcement is on.
	pub fn is_enforced(&self) -> bool {
		self.enforced
	}

	/// Whether `descriptor` is registered, regardless of enforcement.
	pub fn contains(&self, descriptor: &str) -> bool {
		self.registered.contains(descriptor)
	}

	/// Gate decision for one descriptor.
	pub fn is_allowed(&self, descriptor: &str) -> bool {
		!self.enforced || self.contains(descriptor)
	}

	/// Registered descriptors in sorted order.
	pub fn descriptors(&self) -> impl Iterator<Item = &str> {
		self.registered.iter().map(AsRef::as_ref)
	}
}
