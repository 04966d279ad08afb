//! Declaration-time descriptors for composites and unions.
//!
//! A schema is built once per declared type (behind `lazy_static!` in the
//! generated code) and is immutable afterwards. Duplicate names are a bug in
//! the declaration and panic when the schema is first built.

use std::any::TypeId;

use rustc_hash::FxHashMap;

use crate::error::ValidationError;

/// Maximum number of variants a union can declare; the discriminant is one byte.
pub const MAX_VARIANTS: usize = u8::MAX as usize + 1;

// =============================================================================
// COMPOSITES
// =============================================================================

/// One named, typed field of a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub type_name: &'static str,
    /// Whether the field's codec accepts raw values, so that
    /// `Composite::set_field` can assign it.
    pub settable: bool,
}

/// Ordered field list of a composite, base fields first.
#[derive(Debug)]
pub struct CompositeSchema {
    name: &'static str,
    fields: Vec<FieldDescriptor>,
    index: FxHashMap<&'static str, usize>,
}

impl CompositeSchema {
    /// Builds a schema from fields in wire order.
    ///
    /// # Panics
    ///
    /// Panics if two fields share a name.
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        let mut index = FxHashMap::default();
        for (position, field) in fields.iter().enumerate() {
            let previous = index.insert(field.name, position);
            assert!(
                previous.is_none(),
                "duplicate field {:?} in composite {}",
                field.name,
                name
            );
        }
        Self {
            name,
            fields,
            index,
        }
    }

    /// Builds a schema whose fields are `base`'s followed by `own`.
    ///
    /// # Panics
    ///
    /// Panics if an own field repeats a base field name.
    pub fn extend(
        name: &'static str,
        base: &CompositeSchema,
        own: impl IntoIterator<Item = FieldDescriptor>,
    ) -> Self {
        let mut fields = base.fields.clone();
        fields.extend(own);
        Self::new(name, fields)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of the field called `name` in wire order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.position(name).map(|i| &self.fields[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Like [`position`](Self::position), failing with `UnknownField`.
    pub fn require(&self, name: &str) -> Result<usize, ValidationError> {
        self.position(name).ok_or_else(|| ValidationError::UnknownField {
            schema: self.name,
            field: name.to_string(),
        })
    }
}

// =============================================================================
// UNIONS
// =============================================================================

/// One declared alternative of a union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantDescriptor {
    /// Accessor name, used by name-based access.
    pub name: &'static str,
    /// Enum variant identifier.
    pub variant: &'static str,
    pub type_name: &'static str,
    pub type_id: TypeId,
    /// Whether the codec accepts raw values through `Union::set_value_of`.
    pub settable: bool,
}

/// Ordered variant list of a union with name and type lookups.
///
/// The position of a variant is its wire discriminant.
#[derive(Debug)]
pub struct UnionSchema {
    name: &'static str,
    variants: Vec<VariantDescriptor>,
    by_name: FxHashMap<&'static str, usize>,
    by_type: FxHashMap<TypeId, usize>,
}

impl UnionSchema {
    /// Builds a schema from variants in declaration order.
    ///
    /// # Panics
    ///
    /// Panics if there are no variants, more than [`MAX_VARIANTS`], or if
    /// two variants share a name or a type.
    pub fn new(name: &'static str, variants: Vec<VariantDescriptor>) -> Self {
        assert!(!variants.is_empty(), "union {} declares no variants", name);
        assert!(
            variants.len() <= MAX_VARIANTS,
            "union {} declares {} variants (max {})",
            name,
            variants.len(),
            MAX_VARIANTS
        );

        let mut by_name = FxHashMap::default();
        let mut by_type = FxHashMap::default();
        for (position, variant) in variants.iter().enumerate() {
            assert!(
                by_name.insert(variant.name, position).is_none(),
                "duplicate variant {:?} in union {}",
                variant.name,
                name
            );
            assert!(
                by_type.insert(variant.type_id, position).is_none(),
                "type {} declared twice in union {}",
                variant.type_name,
                name
            );
        }
        Self {
            name,
            variants,
            by_name,
            by_type,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn variants(&self) -> &[VariantDescriptor] {
        &self.variants
    }

    pub fn variant(&self, index: usize) -> Option<&VariantDescriptor> {
        self.variants.get(index)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn index_of_type(&self, type_id: TypeId) -> Option<usize> {
        self.by_type.get(&type_id).copied()
    }

    /// Accessor name of the variant at `index`, or `"?"` past the end.
    pub fn name_at(&self, index: usize) -> &'static str {
        self.variants.get(index).map_or("?", |v| v.name)
    }

    /// Like [`index_of_name`](Self::index_of_name), failing with `UndeclaredVariant`.
    pub fn require_name(&self, name: &str) -> Result<usize, ValidationError> {
        self.index_of_name(name)
            .ok_or_else(|| ValidationError::UndeclaredVariant {
                union: self.name,
                variant: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &'static str) -> FieldDescriptor {
        FieldDescriptor {
            name,
            type_name: "SerialU8",
            settable: true,
        }
    }

    fn variant<T: 'static>(name: &'static str) -> VariantDescriptor {
        VariantDescriptor {
            name,
            variant: name,
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            settable: true,
        }
    }

    #[test]
    fn test_composite_lookup() {
        let schema = CompositeSchema::new("Point", vec![field("x"), field("y")]);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.position("y"), Some(1));
        assert!(schema.contains("x"));
        assert_eq!(
            schema.require("z"),
            Err(ValidationError::UnknownField {
                schema: "Point",
                field: "z".to_string()
            })
        );
    }

    #[test]
    fn test_extend_puts_base_first() {
        let base = CompositeSchema::new("Base", vec![field("a")]);
        let derived = CompositeSchema::extend("Derived", &base, vec![field("b"), field("c")]);
        let names: Vec<_> = derived.fields().iter().map(|f| f.name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    #[should_panic(expected = "duplicate field")]
    fn test_duplicate_field_panics() {
        let base = CompositeSchema::new("Base", vec![field("a")]);
        CompositeSchema::extend("Derived", &base, vec![field("a")]);
    }

    #[test]
    fn test_union_lookup() {
        let schema = UnionSchema::new("Choice", vec![variant::<u8>("a"), variant::<u16>("b")]);
        assert_eq!(schema.index_of_name("b"), Some(1));
        assert_eq!(schema.index_of_type(TypeId::of::<u8>()), Some(0));
        assert_eq!(schema.index_of_type(TypeId::of::<u32>()), None);
        assert_eq!(schema.name_at(1), "b");
        assert_eq!(schema.name_at(7), "?");
        assert!(matches!(
            schema.require_name("c"),
            Err(ValidationError::UndeclaredVariant { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "declared twice")]
    fn test_duplicate_variant_type_panics() {
        UnionSchema::new("Choice", vec![variant::<u8>("a"), variant::<u8>("b")]);
    }
}
