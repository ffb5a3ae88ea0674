//! Enum and record declarations.
//!
//! Declarations hold the shape metadata that destructure patterns rely on:
//! stable variant tags, ordered field lists, and the types each position
//! accepts. Construction goes through the declaration so every value it
//! produces has a valid shape.

use crate::errors::{
    invalid_shape, missing_field, type_mismatch, unknown_field, unknown_variant, EvalError,
    EvalResult,
};
use crate::ty::TypeDesc;
use crate::value::{Name, Value};

/// Payload shape of one enum variant.
#[derive(Clone, Debug, PartialEq)]
pub enum VariantShape {
    /// No payload.
    Unit,
    /// Positional payload.
    Tuple(Vec<TypeDesc>),
    /// Named payload, stored positionally in declaration order.
    Fields(Vec<(Name, TypeDesc)>),
}

impl VariantShape {
    pub fn arity(&self) -> usize {
        match self {
            VariantShape::Unit => 0,
            VariantShape::Tuple(types) => types.len(),
            VariantShape::Fields(fields) => fields.len(),
        }
    }

    fn slot_type(&self, index: usize) -> Option<&TypeDesc> {
        match self {
            VariantShape::Unit => None,
            VariantShape::Tuple(types) => types.get(index),
            VariantShape::Fields(fields) => fields.get(index).map(|(_, ty)| ty),
        }
    }
}

/// An enum declaration.
///
/// ```text
/// let color = EnumDef::new("Color")
///     .unit("Red")
///     .tuple("Rgb", [TypeDesc::Int, TypeDesc::Int, TypeDesc::Int])
///     .fields("Hsl", [("h", TypeDesc::Str), ("s", TypeDesc::Str)]);
/// let red = color.value("Red")?;
/// let rgb = color.construct("Rgb", vec![Value::int(1), Value::int(2), Value::int(3)])?;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EnumDef {
    name: Name,
    variants: Vec<(Name, VariantShape)>,
}

impl EnumDef {
    pub fn new(name: impl Into<Name>) -> Self {
        EnumDef {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    /// Add a variant; redeclaring a name replaces its shape.
    #[must_use]
    pub fn variant(mut self, name: impl Into<Name>, shape: VariantShape) -> Self {
        let name = name.into();
        if let Some(slot) = self.variants.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = shape;
        } else {
            self.variants.push((name, shape));
        }
        self
    }

    #[must_use]
    pub fn unit(self, name: impl Into<Name>) -> Self {
        self.variant(name, VariantShape::Unit)
    }

    #[must_use]
    pub fn tuple(self, name: impl Into<Name>, types: impl IntoIterator<Item = TypeDesc>) -> Self {
        self.variant(name, VariantShape::Tuple(types.into_iter().collect()))
    }

    #[must_use]
    pub fn fields<N: Into<Name>>(
        self,
        name: impl Into<Name>,
        fields: impl IntoIterator<Item = (N, TypeDesc)>,
    ) -> Self {
        let fields = fields.into_iter().map(|(n, t)| (n.into(), t)).collect();
        self.variant(name, VariantShape::Fields(fields))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|(n, _)| &**n)
    }

    pub fn shape(&self, variant: &str) -> Option<&VariantShape> {
        self.variants
            .iter()
            .find(|(n, _)| &**n == variant)
            .map(|(_, shape)| shape)
    }

    /// Type descriptor for every variant of this enum.
    pub fn type_desc(&self) -> TypeDesc {
        TypeDesc::Enum(Name::clone(&self.name))
    }

    /// Type descriptor for one variant.
    pub fn variant_type(&self, variant: &str) -> TypeDesc {
        TypeDesc::variant(Name::clone(&self.name), variant)
    }

    fn find(&self, variant: &str) -> Result<(&Name, &VariantShape), EvalError> {
        self.variants
            .iter()
            .find(|(n, _)| &**n == variant)
            .map(|(n, shape)| (n, shape))
            .ok_or_else(|| unknown_variant(&self.name, variant))
    }

    /// The value of a fieldless variant.
    pub fn value(&self, variant: &str) -> EvalResult {
        self.construct(variant, Vec::new())
    }

    /// Build a variant from a positional payload.
    pub fn construct(&self, variant: &str, payload: Vec<Value>) -> EvalResult {
        let (name, shape) = self.find(variant)?;
        let target = format!("{}.{}", self.name, name);
        if payload.len() != shape.arity() {
            return Err(invalid_shape(
                &target,
                format!("expected {} value(s), got {}", shape.arity(), payload.len()),
            ));
        }
        for (i, value) in payload.iter().enumerate() {
            if let Some(ty) = shape.slot_type(i) {
                if !ty.admits(value) {
                    return Err(invalid_shape(
                        &target,
                        format!("position {i} expects {ty}, got {}", value.type_name()),
                    )
                    .with_value(value.clone()));
                }
            }
        }
        tracing::trace!(variant = %target, "constructed enum variant");
        Ok(Value::variant(Name::clone(&self.name), Name::clone(name), payload))
    }

    /// Build a named-field variant from `(field, value)` pairs.
    ///
    /// Pairs may come in any order; the payload is stored in declaration
    /// order.
    pub fn construct_named<N: AsRef<str>>(
        &self,
        variant: &str,
        values: impl IntoIterator<Item = (N, Value)>,
    ) -> EvalResult {
        let (name, shape) = self.find(variant)?;
        let target = format!("{}.{}", self.name, name);
        let VariantShape::Fields(fields) = shape else {
            return Err(invalid_shape(&target, "variant has no named fields"));
        };
        let given: Vec<(N, Value)> = values.into_iter().collect();
        let mut payload = Vec::with_capacity(fields.len());
        for (field, _) in fields {
            let value = given
                .iter()
                .rev()
                .find(|(n, _)| n.as_ref() == &**field)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| missing_field(&target, field))?;
            payload.push(value);
        }
        if let Some((extra, _)) = given
            .iter()
            .find(|(n, _)| !fields.iter().any(|(f, _)| &**f == n.as_ref()))
        {
            return Err(unknown_field(&target, extra.as_ref()));
        }
        self.construct(variant, payload)
    }
}

/// A record declaration.
///
/// ```text
/// let point = RecordDef::new("Point")
///     .field("x", TypeDesc::Int)
///     .field_with_default("y", TypeDesc::Int, Value::int(0));
/// let p = point.construct([("x", Value::int(3))])?;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RecordDef {
    name: Name,
    fields: Vec<(Name, TypeDesc, Option<Value>)>,
}

impl RecordDef {
    pub fn new(name: impl Into<Name>) -> Self {
        RecordDef {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<Name>, ty: TypeDesc) -> Self {
        self.fields.push((name.into(), ty, None));
        self
    }

    #[must_use]
    pub fn field_with_default(
        mut self,
        name: impl Into<Name>,
        ty: TypeDesc,
        default: Value,
    ) -> Self {
        self.fields.push((name.into(), ty, Some(default)));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _, _)| &**n)
    }

    pub fn type_desc(&self) -> TypeDesc {
        TypeDesc::Record(Name::clone(&self.name))
    }

    /// Build a record, filling defaults and checking every field's type.
    pub fn construct<N: AsRef<str>>(
        &self,
        values: impl IntoIterator<Item = (N, Value)>,
    ) -> EvalResult {
        let given: Vec<(N, Value)> = values.into_iter().collect();
        if let Some((extra, _)) = given
            .iter()
            .find(|(n, _)| !self.fields.iter().any(|(f, _, _)| &**f == n.as_ref()))
        {
            return Err(unknown_field(&self.name, extra.as_ref()));
        }

        let mut fields = Vec::with_capacity(self.fields.len());
        for (field, ty, default) in &self.fields {
            let value = given
                .iter()
                .rev()
                .find(|(n, _)| n.as_ref() == &**field)
                .map(|(_, v)| v.clone())
                .or_else(|| default.clone())
                .ok_or_else(|| missing_field(&self.name, field))?;
            if !ty.admits(&value) {
                return Err(invalid_shape(
                    &format!("{}.{}", self.name, field),
                    format!("expected {ty}, got {}", value.type_name()),
                )
                .with_value(value));
            }
            fields.push((Name::clone(field), value));
        }
        Ok(Value::record(Name::clone(&self.name), fields))
    }
}

/// A typed name binding.
///
/// Assigning checks the value against the declared type and keeps the
/// original untouched; every assignment produces a new binding.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    name: Name,
    ty: TypeDesc,
    value: Option<Value>,
}

impl Assignment {
    pub fn new(name: impl Into<Name>, ty: TypeDesc) -> Self {
        Assignment {
            name: name.into(),
            ty,
            value: None,
        }
    }

    /// Bind `value`, failing when the type does not admit it.
    pub fn assign(&self, value: Value) -> Result<Self, EvalError> {
        if !self.ty.admits(&value) {
            return Err(type_mismatch(&self.ty.to_string(), value.type_name())
                .with_note(format!("in assignment to {}", self.name))
                .with_value(value));
        }
        Ok(Assignment {
            name: Name::clone(&self.name),
            ty: self.ty.clone(),
            value: Some(value),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }

    /// The bound value, or `Void` before assignment.
    pub fn value(&self) -> Value {
        self.value.clone().unwrap_or(Value::Void)
    }

    /// `(name, value)` pair, for building records and maps.
    pub fn pair(&self) -> (Name, Value) {
        (Name::clone(&self.name), self.value())
    }
}
