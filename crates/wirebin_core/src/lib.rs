//! Fast length-prefixed binary encoding of dynamically typed value trees.

/// Wire format, value model, encoder, decoder and the complex-object fallback seam.
pub mod wire;
