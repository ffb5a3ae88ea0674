//! Type descriptors for type patterns and declaration shapes.
//!
//! A `TypeDesc` may be compound: a union (`int | None`) or a parameterised
//! form (`list[str]`). Instance checks never look at type parameters, so a
//! descriptor is first normalised: unions are flattened and every generic is
//! replaced by its origin. The resulting `NormalizedType` is a small set of
//! base descriptors, and a value is admitted when any member admits it.

use smallvec::SmallVec;
use std::fmt;

use crate::value::{Name, Value, OPTION, RESULT};

/// A type a value can be tested against.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    /// Every value.
    Any,
    Void,
    Int,
    Float,
    Bool,
    Str,
    List,
    Tuple,
    Map,
    Function,
    /// Both `Some` and `None`.
    Option,
    /// Both `Ok` and `Err`.
    Result,
    /// Error values, optionally of one kind only.
    Error(Option<Name>),
    /// Every variant of a user enum.
    Enum(Name),
    /// One variant of an enum (built-in families included).
    Variant { type_name: Name, variant_name: Name },
    /// Records of one declared type.
    Record(Name),
    /// Any of several types.
    Union(Vec<TypeDesc>),
    /// A parameterised type such as `list[str]`.
    Generic {
        origin: Box<TypeDesc>,
        args: Vec<TypeDesc>,
    },
}

impl TypeDesc {
    /// `list[item]`.
    pub fn list_of(item: TypeDesc) -> Self {
        TypeDesc::Generic {
            origin: Box::new(TypeDesc::List),
            args: vec![item],
        }
    }

    /// `Option[inner]`.
    pub fn option_of(inner: TypeDesc) -> Self {
        TypeDesc::Generic {
            origin: Box::new(TypeDesc::Option),
            args: vec![inner],
        }
    }

    /// `inner | None`.
    pub fn optional(inner: TypeDesc) -> Self {
        TypeDesc::Union(vec![inner, TypeDesc::none()])
    }

    pub fn union(members: impl IntoIterator<Item = TypeDesc>) -> Self {
        TypeDesc::Union(members.into_iter().collect())
    }

    /// The `Option.None` variant.
    pub fn none() -> Self {
        Self::variant(OPTION, "None")
    }

    pub fn variant(type_name: impl Into<Name>, variant_name: impl Into<Name>) -> Self {
        TypeDesc::Variant {
            type_name: type_name.into(),
            variant_name: variant_name.into(),
        }
    }

    pub fn enum_type(type_name: impl Into<Name>) -> Self {
        TypeDesc::Enum(type_name.into())
    }

    pub fn record(type_name: impl Into<Name>) -> Self {
        TypeDesc::Record(type_name.into())
    }

    pub fn error_kind(kind: impl Into<Name>) -> Self {
        TypeDesc::Error(Some(kind.into()))
    }

    /// Flatten unions and strip generic parameters.
    pub fn normalize(&self) -> NormalizedType {
        let mut members = SmallVec::new();
        self.collect_into(&mut members);
        if members.contains(&TypeDesc::Any) {
            members.clear();
            members.push(TypeDesc::Any);
        }
        NormalizedType { members }
    }

    fn collect_into(&self, out: &mut SmallVec<[TypeDesc; 2]>) {
        match self {
            TypeDesc::Union(items) => {
                for item in items {
                    item.collect_into(out);
                }
            }
            TypeDesc::Generic { origin, .. } => origin.collect_into(out),
            base => {
                if !out.contains(base) {
                    out.push(base.clone());
                }
            }
        }
    }

    /// Whether `value` is an instance of this type.
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            TypeDesc::Union(_) | TypeDesc::Generic { .. } => self.normalize().admits(value),
            base => base_admits(base, value),
        }
    }
}

/// Membership test for a single non-compound descriptor.
fn base_admits(desc: &TypeDesc, value: &Value) -> bool {
    match (desc, value) {
        (TypeDesc::Any, _)
        | (TypeDesc::Void, Value::Void)
        | (TypeDesc::Int, Value::Int(_))
        | (TypeDesc::Float, Value::Float(_))
        | (TypeDesc::Bool, Value::Bool(_))
        | (TypeDesc::Str, Value::Str(_))
        | (TypeDesc::List, Value::List(_))
        | (TypeDesc::Tuple, Value::Tuple(_))
        | (TypeDesc::Map, Value::Map(_))
        | (TypeDesc::Function, Value::Function(_))
        | (TypeDesc::Option, Value::Some(_) | Value::None)
        | (TypeDesc::Result, Value::Ok(_) | Value::Err(_))
        | (TypeDesc::Error(None), Value::Error(_)) => true,
        (TypeDesc::Error(Some(kind)), Value::Error(e)) => e.kind() == &**kind,
        (TypeDesc::Enum(name), _) => value
            .variant_parts()
            .is_some_and(|(ty, _, _)| ty == &**name),
        (
            TypeDesc::Variant {
                type_name,
                variant_name,
            },
            _,
        ) => value
            .variant_parts()
            .is_some_and(|(ty, var, _)| ty == &**type_name && var == &**variant_name),
        (TypeDesc::Record(name), Value::Record(r)) => r.type_name == *name,
        (TypeDesc::Union(_) | TypeDesc::Generic { .. }, _) => desc.admits(value),
        _ => false,
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Any => write!(f, "any"),
            TypeDesc::Void => write!(f, "void"),
            TypeDesc::Int => write!(f, "int"),
            TypeDesc::Float => write!(f, "float"),
            TypeDesc::Bool => write!(f, "bool"),
            TypeDesc::Str => write!(f, "str"),
            TypeDesc::List => write!(f, "list"),
            TypeDesc::Tuple => write!(f, "tuple"),
            TypeDesc::Map => write!(f, "map"),
            TypeDesc::Function => write!(f, "function"),
            TypeDesc::Option => write!(f, "{OPTION}"),
            TypeDesc::Result => write!(f, "{RESULT}"),
            TypeDesc::Error(None) => write!(f, "Error"),
            TypeDesc::Error(Some(kind)) => write!(f, "{kind}"),
            TypeDesc::Enum(name) | TypeDesc::Record(name) => write!(f, "{name}"),
            TypeDesc::Variant {
                type_name,
                variant_name,
            } => {
                if &**type_name == OPTION && &**variant_name == "None" {
                    write!(f, "None")
                } else {
                    write!(f, "{type_name}.{variant_name}")
                }
            }
            TypeDesc::Union(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            TypeDesc::Generic { origin, args } => {
                write!(f, "{origin}[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A flattened set of base descriptors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedType {
    members: SmallVec<[TypeDesc; 2]>,
}

impl NormalizedType {
    /// Whether any member admits `value`.
    pub fn admits(&self, value: &Value) -> bool {
        self.members.iter().any(|m| base_admits(m, value))
    }

    pub fn members(&self) -> &[TypeDesc] {
        &self.members
    }

    pub fn is_any(&self) -> bool {
        self.members.first() == Some(&TypeDesc::Any)
    }
}

impl fmt::Display for NormalizedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{member}")?;
        }
        Ok(())
    }
}

impl From<TypeDesc> for NormalizedType {
    fn from(desc: TypeDesc) -> Self {
        desc.normalize()
    }
}
