//! Flattening of typed request records into `application/x-www-form-urlencoded`
//! key/value maps, in the shape the upstream CDN API expects.
//!
//! The encoder is a [`serde::Serializer`], so the wire name of a field follows the
//! usual serde attributes: `#[serde(rename = "...")]` wins over the field
//! identifier, and `#[serde(rename = "-")]`, `#[serde(skip)]` or
//! `skip_serializing_if` drop the field. Flattening rules per field kind:
//!
//! | kind | emitted as |
//! |------|------------|
//! | string | `name=value`, only when non-empty |
//! | integer / float | `name=value`, always (floats use their shortest round-trip form) |
//! | bool | `name=true` / `name=false`, always |
//! | `Option` | `None` skipped, `Some(v)` encoded as `v` |
//! | sequence | `name[0]`, `name[1]`, ... for scalar elements; other elements are dropped |
//! | nested struct / map | ignored |
//!
//! A top-level `string -> string` map is passed through unchanged.

use std::{collections::BTreeMap, fmt::Display, marker::PhantomData};

use serde::{
    Serialize,
    ser::{
        self, Impossible, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
        SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
    },
};
use thiserror::Error;

/// A flattened form body: wire field name to textual value.
pub type FormBody = BTreeMap<String, String>;

/// Field name that marks a field as never transmitted.
const SKIP_MARKER: &str = "-";

/// Errors produced while flattening a record into a form body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The value handed to the encoder is neither a record nor a string map.
    #[error("form body must be a struct or a string-to-string map, got {0}")]
    InvalidBodyKind(&'static str),

    /// Two fields flattened to the same wire name.
    #[error("form field `{0}` is produced by more than one field")]
    DuplicateField(String),

    /// Error raised from a `Serialize` implementation.
    #[error("{0}")]
    Custom(String),
}

impl ser::Error for FormError {
    fn custom<T: Display>(msg: T) -> Self {
        FormError::Custom(msg.to_string())
    }
}

/// Flatten `value` into a form body.
///
/// # Errors
/// [`FormError::InvalidBodyKind`] when `value` is not a struct or a string map,
/// [`FormError::DuplicateField`] when two fields claim the same wire name.
pub fn encode<T>(value: &T) -> Result<FormBody, FormError>
where
    T: Serialize + ?Sized,
{
    value.serialize(BodySerializer)
}

/// Top-level serializer: accepts records and string maps only.
struct BodySerializer;

macro_rules! reject_body {
    ($($method:ident($($arg:ty),*) => $kind:literal;)*) => {
        $(
            fn $method(self, $(_: $arg),*) -> Result<FormBody, FormError> {
                Err(FormError::InvalidBodyKind($kind))
            }
        )*
    };
}

impl Serializer for BodySerializer {
    type Ok = FormBody;
    type Error = FormError;
    type SerializeSeq = Impossible<FormBody, FormError>;
    type SerializeTuple = Impossible<FormBody, FormError>;
    type SerializeTupleStruct = Impossible<FormBody, FormError>;
    type SerializeTupleVariant = Impossible<FormBody, FormError>;
    type SerializeMap = MapEncoder;
    type SerializeStruct = StructEncoder;
    type SerializeStructVariant = Impossible<FormBody, FormError>;

    reject_body! {
        serialize_bool(bool) => "bool";
        serialize_i8(i8) => "integer";
        serialize_i16(i16) => "integer";
        serialize_i32(i32) => "integer";
        serialize_i64(i64) => "integer";
        serialize_u8(u8) => "integer";
        serialize_u16(u16) => "integer";
        serialize_u32(u32) => "integer";
        serialize_u64(u64) => "integer";
        serialize_f32(f32) => "float";
        serialize_f64(f64) => "float";
        serialize_char(char) => "char";
        serialize_str(&str) => "string";
        serialize_bytes(&[u8]) => "bytes";
        serialize_none() => "none";
        serialize_unit() => "unit";
    }

    fn serialize_some<T>(self, value: &T) -> Result<FormBody, FormError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<FormBody, FormError> {
        Ok(FormBody::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Result<FormBody, FormError> {
        Err(FormError::InvalidBodyKind("enum"))
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<FormBody, FormError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<FormBody, FormError>
    where
        T: Serialize + ?Sized,
    {
        Err(FormError::InvalidBodyKind("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, FormError> {
        Err(FormError::InvalidBodyKind("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, FormError> {
        Err(FormError::InvalidBodyKind("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, FormError> {
        Err(FormError::InvalidBodyKind("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, FormError> {
        Err(FormError::InvalidBodyKind("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapEncoder, FormError> {
        Ok(MapEncoder {
            form: FormBody::new(),
            pending_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<StructEncoder, FormError> {
        Ok(StructEncoder {
            form: FormBody::new(),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, FormError> {
        Err(FormError::InvalidBodyKind("enum"))
    }
}

/// Collects the fields of a top-level record.
struct StructEncoder {
    form: FormBody,
}

impl StructEncoder {
    fn insert(&mut self, name: String, value: String) -> Result<(), FormError> {
        if self.form.contains_key(&name) {
            return Err(FormError::DuplicateField(name));
        }
        self.form.insert(name, value);
        Ok(())
    }
}

impl SerializeStruct for StructEncoder {
    type Ok = FormBody;
    type Error = FormError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        if key == SKIP_MARKER {
            return Ok(());
        }

        match value.serialize(FieldSerializer)? {
            FieldValue::Skip => Ok(()),
            FieldValue::Scalar(text) => self.insert(key.to_string(), text),
            FieldValue::Seq(items) => {
                for (index, item) in items.into_iter().enumerate() {
                    if let Some(text) = item {
                        self.insert(format!("{key}[{index}]"), text)?;
                    }
                }
                Ok(())
            }
        }
    }

    fn end(self) -> Result<FormBody, FormError> {
        Ok(self.form)
    }
}

/// Passes a top-level string map through unchanged.
struct MapEncoder {
    form: FormBody,
    pending_key: Option<String>,
}

impl SerializeMap for MapEncoder {
    type Ok = FormBody;
    type Error = FormError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        self.pending_key = Some(key.serialize(PlainString {
            what: "map with non-string keys",
        })?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        let value = value.serialize(PlainString {
            what: "map with non-string values",
        })?;
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| FormError::Custom("map value serialized before its key".into()))?;
        self.form.insert(key, value);
        Ok(())
    }

    fn end(self) -> Result<FormBody, FormError> {
        Ok(self.form)
    }
}

/// Result of flattening one record field.
#[derive(Default)]
enum FieldValue {
    #[default]
    Skip,
    Scalar(String),
    Seq(Vec<Option<String>>),
}

struct FieldSerializer;

impl Serializer for FieldSerializer {
    type Ok = FieldValue;
    type Error = FormError;
    type SerializeSeq = SeqCollector;
    type SerializeTuple = SeqCollector;
    type SerializeTupleStruct = SeqCollector;
    type SerializeTupleVariant = Discard<FieldValue>;
    type SerializeMap = Discard<FieldValue>;
    type SerializeStruct = Discard<FieldValue>;
    type SerializeStructVariant = Discard<FieldValue>;

    fn serialize_bool(self, v: bool) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Scalar(v.to_string()))
    }

    fn serialize_i8(self, v: i8) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Scalar(v.to_string()))
    }

    fn serialize_i16(self, v: i16) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Scalar(v.to_string()))
    }

    fn serialize_i32(self, v: i32) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Scalar(v.to_string()))
    }

    fn serialize_i64(self, v: i64) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Scalar(v.to_string()))
    }

    fn serialize_u8(self, v: u8) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Scalar(v.to_string()))
    }

    fn serialize_u16(self, v: u16) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Scalar(v.to_string()))
    }

    fn serialize_u32(self, v: u32) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Scalar(v.to_string()))
    }

    fn serialize_u64(self, v: u64) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Scalar(v.to_string()))
    }

    fn serialize_f32(self, v: f32) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Scalar(v.to_string()))
    }

    fn serialize_f64(self, v: f64) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Scalar(v.to_string()))
    }

    fn serialize_char(self, v: char) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Scalar(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<FieldValue, FormError> {
        if v.is_empty() {
            Ok(FieldValue::Skip)
        } else {
            Ok(FieldValue::Scalar(v.to_string()))
        }
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Skip)
    }

    fn serialize_none(self) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Skip)
    }

    fn serialize_some<T>(self, value: &T) -> Result<FieldValue, FormError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Skip)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Skip)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<FieldValue, FormError> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<FieldValue, FormError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<FieldValue, FormError>
    where
        T: Serialize + ?Sized,
    {
        Ok(FieldValue::Skip)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqCollector, FormError> {
        Ok(SeqCollector {
            items: Vec::with_capacity(len.unwrap_or_default()),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqCollector, FormError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqCollector, FormError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Discard<FieldValue>, FormError> {
        Ok(Discard::new())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Discard<FieldValue>, FormError> {
        Ok(Discard::new())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Discard<FieldValue>, FormError> {
        Ok(Discard::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Discard<FieldValue>, FormError> {
        Ok(Discard::new())
    }
}

/// Collects sequence elements, keeping the original positions of dropped ones.
struct SeqCollector {
    items: Vec<Option<String>>,
}

impl SeqCollector {
    fn push<T>(&mut self, value: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        self.items.push(value.serialize(ElementSerializer)?);
        Ok(())
    }
}

impl SerializeSeq for SeqCollector {
    type Ok = FieldValue;
    type Error = FormError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Seq(self.items))
    }
}

impl SerializeTuple for SeqCollector {
    type Ok = FieldValue;
    type Error = FormError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Seq(self.items))
    }
}

impl SerializeTupleStruct for SeqCollector {
    type Ok = FieldValue;
    type Error = FormError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        self.push(value)
    }

    fn end(self) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Seq(self.items))
    }
}

/// Serializes a single sequence element. `None` means the element is dropped.
struct ElementSerializer;

impl Serializer for ElementSerializer {
    type Ok = Option<String>;
    type Error = FormError;
    type SerializeSeq = Discard<Option<String>>;
    type SerializeTuple = Discard<Option<String>>;
    type SerializeTupleStruct = Discard<Option<String>>;
    type SerializeTupleVariant = Discard<Option<String>>;
    type SerializeMap = Discard<Option<String>>;
    type SerializeStruct = Discard<Option<String>>;
    type SerializeStructVariant = Discard<Option<String>>;

    fn serialize_bool(self, v: bool) -> Result<Option<String>, FormError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i8(self, v: i8) -> Result<Option<String>, FormError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i16(self, v: i16) -> Result<Option<String>, FormError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i32(self, v: i32) -> Result<Option<String>, FormError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_i64(self, v: i64) -> Result<Option<String>, FormError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u8(self, v: u8) -> Result<Option<String>, FormError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u16(self, v: u16) -> Result<Option<String>, FormError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u32(self, v: u32) -> Result<Option<String>, FormError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_u64(self, v: u64) -> Result<Option<String>, FormError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_f32(self, v: f32) -> Result<Option<String>, FormError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_f64(self, v: f64) -> Result<Option<String>, FormError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_char(self, v: char) -> Result<Option<String>, FormError> {
        Ok(Some(v.to_string()))
    }

    // Sequence elements keep empty strings; only whole string fields are elided.
    fn serialize_str(self, v: &str) -> Result<Option<String>, FormError> {
        Ok(Some(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Option<String>, FormError> {
        Ok(None)
    }

    fn serialize_none(self) -> Result<Option<String>, FormError> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Option<String>, FormError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<String>, FormError> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Option<String>, FormError> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<Option<String>, FormError> {
        Ok(Some(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Option<String>, FormError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Option<String>, FormError>
    where
        T: Serialize + ?Sized,
    {
        Ok(None)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Discard<Option<String>>, FormError> {
        Ok(Discard::new())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Discard<Option<String>>, FormError> {
        Ok(Discard::new())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Discard<Option<String>>, FormError> {
        Ok(Discard::new())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Discard<Option<String>>, FormError> {
        Ok(Discard::new())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Discard<Option<String>>, FormError> {
        Ok(Discard::new())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Discard<Option<String>>, FormError> {
        Ok(Discard::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Discard<Option<String>>, FormError> {
        Ok(Discard::new())
    }
}

/// Swallows a compound value that has no form representation.
struct Discard<O> {
    _output: PhantomData<O>,
}

impl<O: Default> Discard<O> {
    fn new() -> Self {
        Self {
            _output: PhantomData,
        }
    }
}

impl<O: Default> SerializeSeq for Discard<O> {
    type Ok = O;
    type Error = FormError;

    fn serialize_element<T>(&mut self, _value: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        Ok(())
    }

    fn end(self) -> Result<O, FormError> {
        Ok(O::default())
    }
}

impl<O: Default> SerializeTuple for Discard<O> {
    type Ok = O;
    type Error = FormError;

    fn serialize_element<T>(&mut self, _value: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        Ok(())
    }

    fn end(self) -> Result<O, FormError> {
        Ok(O::default())
    }
}

impl<O: Default> SerializeTupleStruct for Discard<O> {
    type Ok = O;
    type Error = FormError;

    fn serialize_field<T>(&mut self, _value: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        Ok(())
    }

    fn end(self) -> Result<O, FormError> {
        Ok(O::default())
    }
}

impl<O: Default> SerializeTupleVariant for Discard<O> {
    type Ok = O;
    type Error = FormError;

    fn serialize_field<T>(&mut self, _value: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        Ok(())
    }

    fn end(self) -> Result<O, FormError> {
        Ok(O::default())
    }
}

impl<O: Default> SerializeMap for Discard<O> {
    type Ok = O;
    type Error = FormError;

    fn serialize_key<T>(&mut self, _key: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        Ok(())
    }

    fn serialize_value<T>(&mut self, _value: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        Ok(())
    }

    fn end(self) -> Result<O, FormError> {
        Ok(O::default())
    }
}

impl<O: Default> SerializeStruct for Discard<O> {
    type Ok = O;
    type Error = FormError;

    fn serialize_field<T>(&mut self, _key: &'static str, _value: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        Ok(())
    }

    fn end(self) -> Result<O, FormError> {
        Ok(O::default())
    }
}

impl<O: Default> SerializeStructVariant for Discard<O> {
    type Ok = O;
    type Error = FormError;

    fn serialize_field<T>(&mut self, _key: &'static str, _value: &T) -> Result<(), FormError>
    where
        T: Serialize + ?Sized,
    {
        Ok(())
    }

    fn end(self) -> Result<O, FormError> {
        Ok(O::default())
    }
}

/// Accepts string values only; used for the keys and values of a passthrough map.
struct PlainString {
    what: &'static str,
}

impl PlainString {
    fn reject(&self) -> FormError {
        FormError::InvalidBodyKind(self.what)
    }
}

macro_rules! reject_plain {
    ($($method:ident($($arg:ty),*);)*) => {
        $(
            fn $method(self, $(_: $arg),*) -> Result<String, FormError> {
                Err(self.reject())
            }
        )*
    };
}

impl Serializer for PlainString {
    type Ok = String;
    type Error = FormError;
    type SerializeSeq = Impossible<String, FormError>;
    type SerializeTuple = Impossible<String, FormError>;
    type SerializeTupleStruct = Impossible<String, FormError>;
    type SerializeTupleVariant = Impossible<String, FormError>;
    type SerializeMap = Impossible<String, FormError>;
    type SerializeStruct = Impossible<String, FormError>;
    type SerializeStructVariant = Impossible<String, FormError>;

    reject_plain! {
        serialize_bool(bool);
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_f32(f32);
        serialize_f64(f64);
        serialize_char(char);
        serialize_bytes(&[u8]);
        serialize_none();
        serialize_unit();
    }

    fn serialize_str(self, v: &str) -> Result<String, FormError> {
        Ok(v.to_string())
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String, FormError>
    where
        T: Serialize + ?Sized,
    {
        Err(self.reject())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, FormError> {
        Err(self.reject())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Result<String, FormError> {
        Err(self.reject())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String, FormError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, FormError>
    where
        T: Serialize + ?Sized,
    {
        Err(self.reject())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, FormError> {
        Err(self.reject())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, FormError> {
        Err(self.reject())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, FormError> {
        Err(self.reject())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, FormError> {
        Err(self.reject())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, FormError> {
        Err(self.reject())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, FormError> {
        Err(self.reject())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, FormError> {
        Err(self.reject())
    }
}
