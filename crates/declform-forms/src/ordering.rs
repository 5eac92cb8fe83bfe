//! Ordering stage: puts descriptors into display order.
//!
//! Descriptors are sorted ascending by [`FieldDescriptor::order`] with a
//! stable sort. Equal keys compare as equal and keep their configuration
//! order; there is no secondary key. Nothing is dropped, duplicated, or
//! modified. This stage runs before the control tree is built so that the
//! builder, the snapshot, and the renderer all see the same sequence.

use crate::descriptor::FieldDescriptor;

/// Returns the descriptors in display order.
pub fn sort_descriptors(mut descriptors: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
    descriptors.sort_by_key(|field| field.order);
    descriptors
}

/// Returns `true` if the descriptors are already in display order.
pub fn is_sorted(descriptors: &[FieldDescriptor]) -> bool {
    descriptors.windows(2).all(|pair| pair[0].order <= pair[1].order)
}
