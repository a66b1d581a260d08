use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::wire::BoxError;

/// A complex host object with no native wire shape.
///
/// Such objects travel as Opaque records: the [`FallbackCodec`] turns them into
/// bytes, and the allow-list gate decides by [`descriptor`](Self::descriptor)
/// whether that delegation is permitted at all.
pub trait NativeObject: fmt::Debug + Send + Sync + 'static {
	/// Stable type descriptor, e.g. `decimal.Decimal`.
	fn descriptor(&self) -> &str;

	/// Upcast for downcasting in [`eq_object`](Self::eq_object) implementations.
	fn as_any(&self) -> &dyn Any;

	/// Structural equality against another object.
	fn eq_object(&self, other: &dyn NativeObject) -> bool;
}

/// Pluggable secondary codec for [`NativeObject`] values.
///
/// Decoding an opaque payload may run arbitrary codec logic, which is why the
/// encoder only hands it objects the allow-list admits.
pub trait FallbackCodec {
	/// Serialize one object.
	fn encode_opaque(&self, object: &dyn NativeObject) -> std::result::Result<Vec<u8>, BoxError>;

	/// Reconstruct one object from its payload.
	fn decode_opaque(&self, bytes: &[u8]) -> std::result::Result<Arc<dyn NativeObject>, BoxError>;
}

/// [`NativeObject::eq_object`] helper for types with a regular `PartialEq`.
pub fn object_eq<T: NativeObject + PartialEq>(this: &T, other: &dyn NativeObject) -> bool {
	other.as_any().downcast_ref::<T>().is_some_and(|other| other == this)
}
