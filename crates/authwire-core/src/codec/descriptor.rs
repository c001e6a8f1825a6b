//! Static descriptions of message schemas.
//!
//! Rather than duplicating encode/decode/JSON logic inside every message
//! type, each message contributes one `static` [`MessageDescriptor`] — an
//! ordered table of field number, JSON name, kind, and presence — and the
//! generic interpreter in the sibling modules walks that table.  Adding a
//! message to the protocol surface means adding data, not codec code.

use std::any::Any;

use crate::codec::value::{FieldValue, FieldView};
use crate::error::DecodeError;
use crate::wire::WireType;

// ── Field shape ───────────────────────────────────────────────────────────────

/// How a field's presence is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Singular scalar: always has a value; the default value is skipped on
    /// encode and indistinguishable from "never written" on decode.
    Implicit,
    /// Optional: absent round-trips as absent (`None`), never as a zero
    /// value.  Nested messages and well-known types are always explicit.
    Explicit,
    /// Ordered sequence; an empty sequence emits nothing.
    Repeated,
}

/// The semantic type a field stores.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Bool,
    Int32,
    Int64,
    Uint32,
    Uint64,
    String,
    Bytes,
    /// Open enum; the descriptor supplies number <-> name mapping for JSON.
    Enum(&'static EnumDescriptor),
    /// Nested message with its own descriptor.
    Message(&'static MessageDescriptor),
    /// Well-known timestamp (`seconds`/`nanos`, RFC 3339 in JSON).
    Timestamp,
    /// Opaque key/value payload carried verbatim (`google.protobuf.Struct`
    /// on the wire, a plain JSON object in the JSON form).  The codec never
    /// inspects its contents.
    Struct,
}

impl FieldKind {
    /// The wire type this kind encodes with.
    pub fn wire_type(&self) -> WireType {
        match self {
            FieldKind::Bool
            | FieldKind::Int32
            | FieldKind::Int64
            | FieldKind::Uint32
            | FieldKind::Uint64
            | FieldKind::Enum(_) => WireType::Varint,
            FieldKind::String
            | FieldKind::Bytes
            | FieldKind::Message(_)
            | FieldKind::Timestamp
            | FieldKind::Struct => WireType::LengthDelimited,
        }
    }
}

/// One row of a message's field table.
#[derive(Debug)]
pub struct FieldDescriptor {
    /// Wire field number.  Tables are declared in ascending order and the
    /// encoder emits fields in table order.
    pub number: u32,
    /// camelCase key used in the JSON form.
    pub json_name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
}

impl FieldDescriptor {
    /// A singular (implicit-presence) field.
    pub const fn singular(number: u32, json_name: &'static str, kind: FieldKind) -> Self {
        Self {
            number,
            json_name,
            kind,
            presence: Presence::Implicit,
        }
    }

    /// An optional (explicit-presence) field.
    pub const fn optional(number: u32, json_name: &'static str, kind: FieldKind) -> Self {
        Self {
            number,
            json_name,
            kind,
            presence: Presence::Explicit,
        }
    }

    /// A repeated field.
    pub const fn repeated(number: u32, json_name: &'static str, kind: FieldKind) -> Self {
        Self {
            number,
            json_name,
            kind,
            presence: Presence::Repeated,
        }
    }
}

/// Number <-> symbolic-name table for an open enum.
#[derive(Debug)]
pub struct EnumDescriptor {
    pub name: &'static str,
    /// Known `(number, name)` pairs.  The `Unrecognized` sentinel is not
    /// listed; it covers every number absent from this table.
    pub values: &'static [(i32, &'static str)],
}

impl EnumDescriptor {
    /// Symbolic name for a number, if the number is known.
    pub fn name_of(&self, number: i32) -> Option<&'static str> {
        self.values
            .iter()
            .find(|(value, _)| *value == number)
            .map(|(_, name)| *name)
    }

    /// Number for a symbolic name, if the name is known.
    pub fn number_of(&self, name: &str) -> Option<i32> {
        self.values
            .iter()
            .find(|(_, value_name)| *value_name == name)
            .map(|(value, _)| *value)
    }
}

/// Schema of one message type.
#[derive(Debug)]
pub struct MessageDescriptor {
    pub name: &'static str,
    /// Field table in ascending field-number order.
    pub fields: &'static [FieldDescriptor],
    /// Constructs a default-shaped instance; used when decoding a nested
    /// field whose concrete type is only known through this descriptor.
    pub new_instance: fn() -> Box<dyn DynMessage>,
}

impl MessageDescriptor {
    pub const fn new(
        name: &'static str,
        fields: &'static [FieldDescriptor],
        new_instance: fn() -> Box<dyn DynMessage>,
    ) -> Self {
        Self {
            name,
            fields,
            new_instance,
        }
    }

    /// Looks up a field by wire number.
    pub fn field(&self, number: u32) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.number == number)
    }
}

// ── Message traits ────────────────────────────────────────────────────────────

/// A protocol message: a plain value with a descriptor and dynamic field
/// access for the generic interpreter.
///
/// Implementations supply three things: the descriptor table, a borrowed
/// view of each field (`field`), and a setter that stores decoded values
/// (`set_field`, with append semantics for repeated fields).  Messages with
/// nested message fields additionally expose them through [`Message::nested_mut`]
/// so deep merging can recurse in place.
pub trait Message: Default + Clone + PartialEq + std::fmt::Debug + Sized + 'static {
    /// The static schema for this type.
    fn descriptor() -> &'static MessageDescriptor;

    /// Borrows the current value of a field.
    ///
    /// Returns `None` for absent optional fields and for numbers outside
    /// the descriptor table.  Implicit-presence fields always return a
    /// view; the interpreter decides whether a default value is written.
    fn field(&self, number: u32) -> Option<FieldView<'_>>;

    /// Stores a value produced by the interpreter.
    ///
    /// Singular fields are replaced, repeated fields are appended to.  An
    /// error here means the value kind does not match the descriptor —
    /// a bug in the message definition, never a property of the input.
    fn set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError>;

    /// Mutable access to a *present* nested message field, for deep merges.
    fn nested_mut(&mut self, _number: u32) -> Option<&mut dyn DynMessage> {
        None
    }
}

/// Object-safe view of [`Message`], used wherever the interpreter walks
/// messages whose concrete type is only known through a descriptor.
pub trait DynMessage: 'static {
    fn dyn_descriptor(&self) -> &'static MessageDescriptor;
    fn dyn_field(&self, number: u32) -> Option<FieldView<'_>>;
    fn dyn_set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError>;
    fn dyn_nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage>;
    fn clone_boxed(&self) -> Box<dyn DynMessage>;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<M: Message> DynMessage for M {
    fn dyn_descriptor(&self) -> &'static MessageDescriptor {
        M::descriptor()
    }

    fn dyn_field(&self, number: u32) -> Option<FieldView<'_>> {
        self.field(number)
    }

    fn dyn_set_field(&mut self, number: u32, value: FieldValue) -> Result<(), DecodeError> {
        self.set_field(number, value)
    }

    fn dyn_nested_mut(&mut self, number: u32) -> Option<&mut dyn DynMessage> {
        self.nested_mut(number)
    }

    fn clone_boxed(&self) -> Box<dyn DynMessage> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Constructor stored in descriptor tables.
pub fn new_boxed<M: Message>() -> Box<dyn DynMessage> {
    Box::new(M::default())
}

/// Recovers a concrete message from a boxed dynamic one.
///
/// # Errors
///
/// [`DecodeError::WrongMessageType`] if the box holds a different type,
/// which can only happen when a descriptor table points at the wrong
/// nested descriptor.
pub fn downcast<M: Message>(message: Box<dyn DynMessage>) -> Result<M, DecodeError> {
    message
        .into_any()
        .downcast::<M>()
        .map(|boxed| *boxed)
        .map_err(|_| DecodeError::WrongMessageType {
            expected: M::descriptor().name,
        })
}
