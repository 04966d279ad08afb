//! Union engine: exactly one active variant out of a declared set.
//!
//! A union is declared with [`serial_union!`](crate::serial_union), which
//! generates a sum type holding the active codec and a wrapper struct
//! implementing [`Union`]. The wire form is a one-byte discriminant (the
//! variant's declaration index) followed by the active variant.
//!
//! ```rust
//! use serialkit::{serial_union, Codec, Serializable, Union, SerialString, SerialU16, SerialU32};
//!
//! serial_union! {
//!     pub struct Choice(ChoiceValue) {
//!         A(a / set_a): SerialU16,
//!         B(b / set_b): SerialU32,
//!         C(c / set_c): SerialString,
//!     }
//! }
//!
//! let mut choice = Choice::new();
//! assert_eq!(choice.a().unwrap(), 0);
//!
//! choice.set_b(5u32).unwrap();
//! assert!(choice.a().is_err());
//!
//! let bytes = choice.to_bytes().unwrap();
//! assert_eq!(bytes[0], 1);
//! let (decoded, _) = Choice::from_bytes(&bytes, 0).unwrap();
//! assert_eq!(decoded.b().unwrap(), 5);
//! ```

use std::any::{Any, TypeId};
use std::fmt;

use log::{debug, trace};

use crate::codec::{Reader, Writer};
use crate::error::{DecodeError, EncodeError, ValidationError};
use crate::schema::UnionSchema;
use crate::serial::{Codec, Serializable};
use crate::value::Value;

/// The sum type behind a union; one enum variant per declared codec type.
pub trait UnionKind: fmt::Debug + Clone + PartialEq + Sized + 'static {
    /// Accessor name of the active variant.
    fn name(&self) -> &'static str;

    /// Type of the active codec.
    fn member_type(&self) -> TypeId;

    fn as_codec(&self) -> &dyn Codec;

    fn as_codec_mut(&mut self) -> &mut dyn Codec;

    /// A fresh default of the variant with accessor `name`.
    fn default_for(name: &str) -> Option<Self>;

    /// Wraps a boxed codec if its type is declared; hands it back otherwise.
    fn from_any(value: Box<dyn Any>) -> Result<Self, Box<dyn Any>>;
}

/// A declared codec type of the union `U`.
pub trait UnionMember<U: Union>: Serializable {
    fn wrap(self) -> U::Kind;

    fn project(kind: &U::Kind) -> Option<&Self>;

    fn project_mut(kind: &mut U::Kind) -> Option<&mut Self>;
}

/// Access to a declared union.
///
/// Typed operations take the codec type as a parameter and cannot name an
/// undeclared type. The `TypeId`, name and [`Value`] forms check at runtime
/// and leave the union unchanged when they fail.
pub trait Union: Serializable {
    type Kind: UnionKind;

    /// The variant list, built once.
    fn schema() -> &'static UnionSchema;

    fn kind(&self) -> &Self::Kind;

    fn kind_mut(&mut self) -> &mut Self::Kind;

    /// Activates `kind` and returns the previously active variant.
    fn replace(&mut self, kind: Self::Kind) -> Self::Kind;

    fn variant_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Declaration index of the active variant; its wire discriminant.
    fn variant_index(&self) -> usize {
        // Every kind name comes from the schema.
        Self::schema()
            .index_of_name(self.variant_name())
            .unwrap_or_default()
    }

    /// Type of the active variant.
    fn get_type(&self) -> TypeId {
        self.kind().member_type()
    }

    fn active(&self) -> &dyn Codec {
        self.kind().as_codec()
    }

    fn active_mut(&mut self) -> &mut dyn Codec {
        self.kind_mut().as_codec_mut()
    }

    /// Adopts `value` as the active variant.
    fn set<T: UnionMember<Self>>(&mut self, value: T) {
        self.replace(value.wrap());
    }

    /// Activates a fresh default of `T`.
    fn set_default<T: UnionMember<Self>>(&mut self) {
        self.set(T::default());
    }

    /// Borrows the active variant as `T`.
    fn project<T: UnionMember<Self>>(&self) -> Result<&T, ValidationError> {
        T::project(self.kind()).ok_or_else(|| inactive::<Self, T>(self))
    }

    fn project_mut<T: UnionMember<Self>>(&mut self) -> Result<&mut T, ValidationError> {
        let active = self.variant_name();
        T::project_mut(self.kind_mut()).ok_or_else(|| ValidationError::InactiveVariant {
            requested: member_name::<Self, T>(),
            active,
        })
    }

    /// Adopts a boxed codec, failing if its type is not declared.
    fn set_any(&mut self, value: Box<dyn Any>) -> Result<(), ValidationError> {
        let kind = Self::Kind::from_any(value).map_err(|_| ValidationError::UndeclaredVariant {
            union: Self::schema().name(),
            variant: "<undeclared type>".to_string(),
        })?;
        self.replace(kind);
        Ok(())
    }

    /// Activates a fresh default of the declared type `type_id`.
    fn set_type(&mut self, type_id: TypeId) -> Result<(), ValidationError> {
        let schema = Self::schema();
        let index = schema
            .index_of_type(type_id)
            .ok_or_else(|| ValidationError::UndeclaredVariant {
                union: schema.name(),
                variant: format!("{type_id:?}"),
            })?;
        activate_default(self, schema.name_at(index))
    }

    /// Activates a fresh default of the variant called `name`.
    fn set_variant(&mut self, name: &str) -> Result<(), ValidationError> {
        let schema = Self::schema();
        let index = schema.require_name(name)?;
        activate_default(self, schema.name_at(index))
    }

    /// Reads the unwrapped value of the variant called `name`, which must
    /// be active.
    fn get_value_of(&self, name: &str) -> Result<Option<Value>, ValidationError> {
        let schema = Self::schema();
        let index = schema.require_name(name)?;
        if index != self.variant_index() {
            return Err(ValidationError::InactiveVariant {
                requested: schema.name_at(index),
                active: self.variant_name(),
            });
        }
        Ok(self.active().get_value())
    }

    /// Activates the variant called `name` if needed and sets its value.
    ///
    /// A previously active other variant is discarded. On failure the union
    /// is unchanged.
    fn set_value_of(&mut self, name: &str, value: Value) -> Result<(), ValidationError> {
        let schema = Self::schema();
        let descriptor = &schema.variants()[schema.require_name(name)?];
        if !descriptor.settable {
            return Err(ValidationError::ReadOnly {
                name: descriptor.name,
            });
        }
        if descriptor.name == self.variant_name() {
            return self.active_mut().set_value(value);
        }
        let mut kind = fresh::<Self>(descriptor.name)?;
        kind.as_codec_mut().set_value(value)?;
        self.replace(kind);
        Ok(())
    }
}

fn member_name<U: Union, T: UnionMember<U>>() -> &'static str {
    let schema = U::schema();
    schema
        .index_of_type(TypeId::of::<T>())
        .map_or("?", |index| schema.name_at(index))
}

fn inactive<U: Union, T: UnionMember<U>>(union: &U) -> ValidationError {
    ValidationError::InactiveVariant {
        requested: member_name::<U, T>(),
        active: union.variant_name(),
    }
}

fn fresh<U: Union>(name: &str) -> Result<U::Kind, ValidationError> {
    U::Kind::default_for(name).ok_or_else(|| ValidationError::UndeclaredVariant {
        union: U::schema().name(),
        variant: name.to_string(),
    })
}

fn activate_default<U: Union>(union: &mut U, name: &str) -> Result<(), ValidationError> {
    let kind = fresh::<U>(name)?;
    union.replace(kind);
    Ok(())
}

/// Writes the discriminant byte and the active variant.
#[doc(hidden)]
pub fn write_union<U: Union>(union: &U, writer: &mut Writer) -> Result<(), EncodeError> {
    writer.write_byte(union.variant_index() as u8);
    union.active().write(writer)
}

/// Reads a discriminant, decodes that variant, then activates it.
///
/// The union is unchanged if any step fails.
#[doc(hidden)]
pub fn load_union<U: Union>(union: &mut U, reader: &mut Reader<'_>) -> Result<(), DecodeError> {
    let schema = U::schema();
    let index = reader.read_byte("union discriminant")?;
    let out_of_range = || DecodeError::DiscriminantOutOfRange {
        schema: schema.name(),
        index: index as u64,
        count: schema.len(),
    };

    let Some(descriptor) = schema.variant(index as usize) else {
        debug!(
            "rejecting {} discriminant {} (count: {})",
            schema.name(),
            index,
            schema.len()
        );
        return Err(out_of_range());
    };
    trace!(
        "decoding {} variant {} at offset {}",
        schema.name(),
        descriptor.name,
        reader.position()
    );

    let mut kind = U::Kind::default_for(descriptor.name).ok_or_else(out_of_range)?;
    kind.as_codec_mut().load_in_place(reader)?;
    union.replace(kind);
    Ok(())
}

/// Declares a union.
///
/// ```text
/// serial_union! {
///     pub struct Name(NameValue) {
///         Variant(accessor [/ setter]): CodecType,
///         ...
///     }
/// }
/// ```
///
/// Generates `enum NameValue` with one variant per entry, the wrapper
/// `struct Name(NameValue)` whose default is the first variant, a getter per
/// entry failing with `InactiveVariant` when another variant is active, a
/// setter for each entry that names one, and the [`Codec`], [`Serializable`],
/// [`Union`] and [`UnionMember`] impls. Each codec type may appear once.
#[macro_export]
macro_rules! serial_union {
    (
        @impl [$(#[$meta:meta])*] $vis:vis $name:ident $kind:ident first($first:ident, $fty:ty)
        [$(
            ($(#[$vmeta:meta])*) $variant:ident $getter:ident ($($setter:ident)?) $ty:ty;
        )+]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $kind {
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
        }

        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name($kind);

        impl $name {
            /// Creates an instance with the first variant active.
            pub fn new() -> Self {
                <Self as ::core::default::Default>::default()
            }

            /// Returns the active variant.
            pub fn get(&self) -> &$kind {
                &self.0
            }

            pub fn get_mut(&mut self) -> &mut $kind {
                &mut self.0
            }

            pub fn into_inner(self) -> $kind {
                self.0
            }

            $(
                #[allow(unreachable_patterns)]
                pub fn $getter(
                    &self,
                ) -> ::core::result::Result<<$ty as $crate::Field>::Output<'_>, $crate::ValidationError> {
                    match &self.0 {
                        $kind::$variant(inner) => Ok($crate::Field::read(inner)),
                        other => Err($crate::ValidationError::InactiveVariant {
                            requested: stringify!($getter),
                            active: $crate::union::UnionKind::name(other),
                        }),
                    }
                }

                $(
                    #[allow(irrefutable_let_patterns, unreachable_code)]
                    pub fn $setter<V>(&mut self, value: V) -> ::core::result::Result<(), $crate::ValidationError>
                    where
                        $ty: $crate::Assign<V>,
                    {
                        if let $kind::$variant(inner) = &mut self.0 {
                            return $crate::Assign::assign(inner, value);
                        }
                        let mut inner = <$ty as ::core::default::Default>::default();
                        $crate::Assign::assign(&mut inner, value)?;
                        self.0 = $kind::$variant(inner);
                        Ok(())
                    }
                )?
            )+
        }

        impl $crate::union::UnionKind for $kind {
            fn name(&self) -> &'static str {
                match self {
                    $($kind::$variant(_) => stringify!($getter),)+
                }
            }

            fn member_type(&self) -> ::core::any::TypeId {
                match self {
                    $($kind::$variant(_) => ::core::any::TypeId::of::<$ty>(),)+
                }
            }

            fn as_codec(&self) -> &dyn $crate::Codec {
                match self {
                    $($kind::$variant(inner) => inner as &dyn $crate::Codec,)+
                }
            }

            fn as_codec_mut(&mut self) -> &mut dyn $crate::Codec {
                match self {
                    $($kind::$variant(inner) => inner as &mut dyn $crate::Codec,)+
                }
            }

            fn default_for(name: &str) -> ::core::option::Option<Self> {
                $(
                    if name == stringify!($getter) {
                        return Some($kind::$variant(<$ty as ::core::default::Default>::default()));
                    }
                )+
                None
            }

            fn from_any(
                value: ::std::boxed::Box<dyn ::core::any::Any>,
            ) -> ::core::result::Result<Self, ::std::boxed::Box<dyn ::core::any::Any>> {
                $(
                    let value = match value.downcast::<$ty>() {
                        Ok(inner) => return Ok($kind::$variant(*inner)),
                        Err(value) => value,
                    };
                )+
                Err(value)
            }
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self($kind::$first(<$fty as ::core::default::Default>::default()))
            }
        }

        impl ::core::convert::From<$kind> for $name {
            fn from(kind: $kind) -> Self {
                Self(kind)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt($crate::union::UnionKind::as_codec(&self.0), f)
            }
        }

        impl $crate::Codec for $name {
            fn type_name(&self) -> &'static str {
                stringify!($name)
            }

            fn write(&self, writer: &mut $crate::codec::Writer) -> ::core::result::Result<(), $crate::EncodeError> {
                $crate::union::write_union(self, writer)
            }

            fn load_in_place(
                &mut self,
                reader: &mut $crate::codec::Reader<'_>,
            ) -> ::core::result::Result<(), $crate::DecodeError> {
                $crate::union::load_union(self, reader)
            }
        }

        impl ::core::convert::TryFrom<$crate::Value> for $name {
            type Error = $crate::ValidationError;

            fn try_from(value: $crate::Value) -> ::core::result::Result<Self, Self::Error> {
                Err(value.wrong_kind(stringify!($name)))
            }
        }

        impl $crate::Serializable for $name {
            const SETTABLE: bool = false;
        }

        impl $crate::Field for $name {
            type Output<'a> = &'a $name;

            fn read(&self) -> &$name {
                self
            }
        }

        impl $crate::Assign<$name> for $name {
            fn assign(&mut self, value: $name) -> ::core::result::Result<(), $crate::ValidationError> {
                *self = value;
                Ok(())
            }
        }

        impl<'b> $crate::Assign<&'b $name> for $name {
            fn assign(&mut self, value: &'b $name) -> ::core::result::Result<(), $crate::ValidationError> {
                self.clone_from(value);
                Ok(())
            }
        }

        $(
            impl $crate::Assign<$ty> for $name {
                fn assign(&mut self, value: $ty) -> ::core::result::Result<(), $crate::ValidationError> {
                    self.0 = $kind::$variant(value);
                    Ok(())
                }
            }

            impl $crate::union::UnionMember<$name> for $ty {
                fn wrap(self) -> $kind {
                    $kind::$variant(self)
                }

                #[allow(unreachable_patterns)]
                fn project(kind: &$kind) -> ::core::option::Option<&Self> {
                    match kind {
                        $kind::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                #[allow(unreachable_patterns)]
                fn project_mut(kind: &mut $kind) -> ::core::option::Option<&mut Self> {
                    match kind {
                        $kind::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )+

        impl $crate::Union for $name {
            type Kind = $kind;

            fn schema() -> &'static $crate::schema::UnionSchema {
                $crate::__private::lazy_static! {
                    static ref SCHEMA: $crate::schema::UnionSchema = $crate::schema::UnionSchema::new(
                        stringify!($name),
                        ::std::vec![$(
                            $crate::schema::VariantDescriptor {
                                name: stringify!($getter),
                                variant: stringify!($variant),
                                type_name: stringify!($ty),
                                type_id: ::core::any::TypeId::of::<$ty>(),
                                settable: <$ty as $crate::Serializable>::SETTABLE,
                            },
                        )+],
                    );
                }
                &SCHEMA
            }

            fn kind(&self) -> &$kind {
                &self.0
            }

            fn kind_mut(&mut self) -> &mut $kind {
                &mut self.0
            }

            fn replace(&mut self, kind: $kind) -> $kind {
                ::core::mem::replace(&mut self.0, kind)
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($kind:ident) {
            $(#[$fmeta:meta])*
            $fvariant:ident($fgetter:ident $(/ $fsetter:ident)?) : $fty:ty
            $(
                , $(#[$vmeta:meta])*
                $variant:ident($getter:ident $(/ $setter:ident)?) : $ty:ty
            )*
            $(,)?
        }
    ) => {
        $crate::serial_union! {
            @impl [$(#[$meta])*] $vis $name $kind first($fvariant, $fty)
            [
                ($(#[$fmeta])*) $fvariant $fgetter ($($fsetter)?) $fty;
                $(($(#[$vmeta])*) $variant $getter ($($setter)?) $ty;)*
            ]
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::SerialList;
    use crate::primitive::{SerialString, SerialU16, SerialU32, SerialU8};

    serial_union! {
        struct Choice(ChoiceValue) {
            A(a / set_a): SerialU16,
            B(b / set_b): SerialU32,
            C(c / set_c): SerialString,
            /// List variant without a typed setter.
            D(d): SerialList<SerialU8>,
        }
    }

    crate::serial_composite! {
        struct Pair {
            left / set_left: SerialU8,
            right / set_right: SerialU8,
        }
    }

    serial_union! {
        struct Slot(SlotValue) {
            Plain(plain / set_plain): SerialU8,
            Inner(inner / set_inner): Pair,
        }
    }

    serial_union! {
        struct Single(SingleValue) {
            Only(only / set_only): SerialU8,
        }
    }

    crate::serial_composite! {
        struct Holder {
            tag / set_tag: SerialU8,
            choice / set_choice: Choice,
        }
    }

    #[test]
    fn test_default_is_first_variant() {
        let choice = Choice::new();
        assert_eq!(choice.variant_name(), "a");
        assert_eq!(choice.variant_index(), 0);
        assert_eq!(choice.a().unwrap(), 0);
        assert_eq!(choice.get_type(), TypeId::of::<SerialU16>());

        let mut expected = vec![0];
        expected.extend(0u16.to_ne_bytes());
        assert_eq!(choice.to_bytes().unwrap(), expected);
    }

    #[test]
    fn test_exclusivity() {
        let mut choice = Choice::new();
        choice.set_b(5u32).unwrap();
        assert_eq!(choice.b().unwrap(), 5);
        assert_eq!(
            choice.a().unwrap_err(),
            ValidationError::InactiveVariant {
                requested: "a",
                active: "b"
            }
        );
        assert_eq!(
            choice.project::<SerialU16>().unwrap_err(),
            ValidationError::InactiveVariant {
                requested: "a",
                active: "b"
            }
        );
        assert_eq!(choice.project::<SerialU32>().unwrap().get(), 5);
    }

    #[test]
    fn test_typed_set() {
        let mut choice = Choice::new();
        choice.set(SerialString::new("hi").unwrap());
        assert_eq!(choice.get_type(), TypeId::of::<SerialString>());
        assert_eq!(choice.c().unwrap(), "hi");
        assert_eq!(choice.to_string(), "hi");

        choice.set_default::<SerialU32>();
        assert_eq!(choice.b().unwrap(), 0);

        choice.project_mut::<SerialU32>().unwrap().set(9u32).unwrap();
        assert_eq!(choice.b().unwrap(), 9);
        assert!(matches!(choice.get(), ChoiceValue::B(_)));
    }

    #[test]
    fn test_setter_converts_and_validates() {
        let mut choice = Choice::new();
        choice.set_b(5u32).unwrap();

        assert!(matches!(
            choice.set_a(70000),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(choice.b().unwrap(), 5);

        choice.set_a(7u8).unwrap();
        assert_eq!(choice.a().unwrap(), 7);
        assert!(choice.b().is_err());
    }

    #[test]
    fn test_runtime_forms() {
        let mut choice = Choice::new();
        choice.set_b(5u32).unwrap();

        assert!(matches!(
            choice.set_type(TypeId::of::<SerialU8>()),
            Err(ValidationError::UndeclaredVariant { union: "Choice", .. })
        ));
        assert!(matches!(
            choice.set_variant("zz"),
            Err(ValidationError::UndeclaredVariant { .. })
        ));
        assert!(choice.set_any(Box::new(SerialU8::new(1u8).unwrap())).is_err());
        assert_eq!(choice.b().unwrap(), 5);

        choice.set_type(TypeId::of::<SerialString>()).unwrap();
        assert_eq!(choice.c().unwrap(), "");
        choice.set_variant("a").unwrap();
        assert_eq!(choice.a().unwrap(), 0);
        choice.set_any(Box::new(SerialU32::new(3u32).unwrap())).unwrap();
        assert_eq!(choice.b().unwrap(), 3);
    }

    #[test]
    fn test_value_access() {
        let mut choice = Choice::new();
        choice.set_value_of("b", Value::Int(12)).unwrap();
        assert_eq!(choice.get_value_of("b").unwrap(), Some(Value::Int(12)));
        assert!(matches!(
            choice.get_value_of("a"),
            Err(ValidationError::InactiveVariant { requested: "a", active: "b" })
        ));

        assert!(matches!(
            choice.set_value_of("a", Value::from("x")),
            Err(ValidationError::WrongKind { .. })
        ));
        assert_eq!(choice.b().unwrap(), 12);

        choice.set_value_of("d", Value::list([1u8])).unwrap();
        assert_eq!(choice.d().unwrap().len(), 1);
        assert!(matches!(
            choice.set_value_of("e", Value::Int(1)),
            Err(ValidationError::UndeclaredVariant { .. })
        ));
    }

    #[test]
    fn test_aggregate_variant_has_no_raw_form() {
        assert!(!Slot::schema().variants()[1].settable);

        let mut slot = Slot::new();
        slot.set_plain(7u8).unwrap();
        assert_eq!(
            slot.set_value_of("inner", Value::Int(1)),
            Err(ValidationError::ReadOnly { name: "inner" })
        );
        assert_eq!(slot.plain().unwrap(), 7);

        let mut pair = Pair::new();
        pair.set_right(2u8).unwrap();
        slot.set_inner(&pair).unwrap();
        assert_eq!(slot.inner().unwrap().right(), 2);
        assert_eq!(slot.get_value_of("inner").unwrap(), None);
    }

    #[test]
    fn test_roundtrip_each_variant() {
        let mut list = SerialList::<SerialU8>::new();
        list.append_value(3u8).unwrap();
        let values = [
            Choice::from(ChoiceValue::A(SerialU16::new(513u16).unwrap())),
            Choice::from(ChoiceValue::B(SerialU32::new(70000u32).unwrap())),
            Choice::from(ChoiceValue::C(SerialString::new("apple").unwrap())),
            Choice::from(ChoiceValue::D(list)),
        ];
        for (index, choice) in values.iter().enumerate() {
            let bytes = choice.to_bytes().unwrap();
            assert_eq!(bytes[0] as usize, index);
            let (decoded, end) = Choice::from_bytes(&bytes, 0).unwrap();
            assert_eq!(end, bytes.len());
            assert_eq!(&decoded, choice);
        }
    }

    #[test]
    fn test_discriminant_out_of_range() {
        let mut choice = Choice::new();
        choice.set_b(5u32).unwrap();
        for index in [4u8, 255] {
            assert_eq!(
                choice.decode(&[index, 0, 0, 0, 0], 0).unwrap_err(),
                DecodeError::DiscriminantOutOfRange {
                    schema: "Choice",
                    index: index as u64,
                    count: 4
                }
            );
        }
        assert_eq!(choice.b().unwrap(), 5);
    }

    #[test]
    fn test_truncated_variant_leaves_union() {
        let mut choice = Choice::new();
        choice.set_c("keep").unwrap();
        assert!(matches!(
            choice.decode(&[1, 0, 0], 0),
            Err(DecodeError::UnexpectedEof { .. })
        ));
        assert_eq!(choice.c().unwrap(), "keep");
    }

    #[test]
    fn test_single_variant() {
        let mut single = Single::new();
        single.set_only(200u8).unwrap();
        assert_eq!(single.to_bytes().unwrap(), vec![0, 200]);
        assert_eq!(Single::schema().len(), 1);
    }

    #[test]
    fn test_union_in_composite() {
        let mut holder = Holder::new();
        holder.set_tag(1u8).unwrap();
        holder.set_choice(SerialU32::new(7u32).unwrap()).unwrap();
        assert_eq!(holder.choice().b().unwrap(), 7);

        let bytes = holder.to_bytes().unwrap();
        assert_eq!(bytes.len(), 1 + 1 + 4);
        let (decoded, _) = Holder::from_bytes(&bytes, 0).unwrap();
        assert_eq!(decoded, holder);
        assert_eq!(decoded.to_string(), "{tag: 1, choice: 7}");
    }
}
