//! Generic deep merge, the builder-style construction primitive.
//!
//! `Default` gives every message its default shape; `merge_message` layers
//! a partially populated value on top of another.  Together they replace
//! the "hydrate a partial object" pattern: build the overlay with struct
//! update syntax (`..Default::default()`) and merge it over a base.
//!
//! Semantics per field:
//!
//! - singular scalars overwrite when the overlay holds a non-default value;
//! - optional fields overwrite when present in the overlay;
//! - nested messages merge recursively when both sides are present,
//!   otherwise the overlay's value is copied in whole;
//! - repeated fields append the overlay's elements to the base, which for
//!   a default base is the same as taking the overlay's list.

use crate::codec::descriptor::{DynMessage, FieldKind, Message, Presence};
use crate::codec::value::{FieldValue, FieldView};
use crate::error::DecodeError;

/// Deep-merges `overlay` into `base`.
///
/// # Errors
///
/// An error can only arise from a mismatch between a message's descriptor
/// table and its accessors; for well-formed message types this is
/// infallible.
pub fn merge_message<M: Message>(base: &mut M, overlay: &M) -> Result<(), DecodeError> {
    merge_fields(base, overlay)
}

pub(crate) fn merge_fields(
    base: &mut dyn DynMessage,
    overlay: &dyn DynMessage,
) -> Result<(), DecodeError> {
    for field in overlay.dyn_descriptor().fields {
        let Some(view) = overlay.dyn_field(field.number) else {
            continue;
        };
        match field.presence {
            Presence::Implicit | Presence::Repeated if view.is_default() => continue,
            _ => {}
        }
        match &view {
            FieldView::List(items) => {
                for item in items {
                    if let Some(value) = item.to_owned_value() {
                        base.dyn_set_field(field.number, value)?;
                    }
                }
            }
            FieldView::Message(nested_overlay) => {
                if matches!(field.kind, FieldKind::Message(_)) {
                    if let Some(nested_base) = base.dyn_nested_mut(field.number) {
                        merge_fields(nested_base, *nested_overlay)?;
                        continue;
                    }
                }
                base.dyn_set_field(
                    field.number,
                    FieldValue::Message(nested_overlay.clone_boxed()),
                )?;
            }
            other => {
                if let Some(value) = other.to_owned_value() {
                    base.dyn_set_field(field.number, value)?;
                }
            }
        }
    }
    Ok(())
}
