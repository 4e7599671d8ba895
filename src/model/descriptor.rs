//! Structural descriptors of compiled types and their members.
//!
//! A [`TypeDescriptor`] is built once by a
//! [`ClassFileParser`](crate::parsers::ClassFileParser) and never mutated by
//! the comparison engine, so the same instance can take part in any number
//! of comparisons.

use super::access::{AccessFlags, TypeCategory};
use super::handle::ElementHandle;
use super::names::{self, CLINIT_NAME, CONSTRUCTOR_NAME};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

// ============================================================================
// Constant values
// ============================================================================

/// Compile-time constant attached to a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl PartialEq for ConstantValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            // bitwise so that NaN constants compare equal to themselves
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            _ => false,
        }
    }
}

// ============================================================================
// Nesting
// ============================================================================

/// Nesting metadata recorded for a type's own inner-class entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nesting {
    /// Enclosing type, absent for local and anonymous types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_name: Option<String>,
    /// Simple source name, absent for anonymous types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_name: Option<String>,
}

/// How a type is nested in its enclosing declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestKind {
    TopLevel,
    Member,
    Local,
    Anonymous,
}

// ============================================================================
// Field Descriptor
// ============================================================================

/// A field declared by a compiled type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub access: AccessFlags,
    /// Raw field descriptor, e.g. `Ljava/lang/String;`
    pub descriptor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ConstantValue>,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, access: u32, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: AccessFlags(access),
            descriptor: descriptor.into(),
            signature: None,
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: ConstantValue) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    #[must_use]
    pub const fn is_enum_constant(&self) -> bool {
        self.access.is_enum()
    }

    #[must_use]
    pub fn handle(&self, owner: &str) -> ElementHandle {
        ElementHandle::field(owner, &self.name)
    }
}

// ============================================================================
// Method Descriptor
// ============================================================================

/// A method, constructor or static initializer declared by a compiled type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub access: AccessFlags,
    /// Raw method descriptor, e.g. `(ILjava/lang/String;)V`
    pub descriptor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Declared thrown types, dotted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exceptions: Option<Vec<String>>,
    /// Default value of an annotation element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

impl MethodDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, access: u32, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: AccessFlags(access),
            descriptor: descriptor.into(),
            signature: None,
            exceptions: None,
            default_value: None,
        }
    }

    #[must_use]
    pub fn with_exceptions<I, S>(mut self, exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exceptions = Some(exceptions.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    #[must_use]
    pub fn with_default_value(mut self, value: serde_json::Value) -> Self {
        self.default_value = Some(value);
        self
    }

    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    #[must_use]
    pub fn is_clinit(&self) -> bool {
        self.name == CLINIT_NAME
    }

    #[must_use]
    pub const fn is_varargs(&self) -> bool {
        self.access.has(AccessFlags::VARARGS)
    }

    /// Declared exceptions, empty when none were recorded.
    #[must_use]
    pub fn exceptions(&self) -> &[String] {
        self.exceptions.as_deref().unwrap_or_default()
    }

    /// Name shown for this method; constructors use the owner's simple name.
    #[must_use]
    pub fn selector<'a>(&'a self, owner: &'a str) -> &'a str {
        if self.is_constructor() {
            names::simple_name(owner)
        } else {
            &self.name
        }
    }

    /// Lookup key reported on deltas: selector followed by the raw descriptor.
    #[must_use]
    pub fn key(&self, owner: &str) -> String {
        format!("{}{}", self.selector(owner), self.descriptor)
    }

    /// Human-readable form, e.g. `m(int)`.
    #[must_use]
    pub fn display_name(&self, owner: &str) -> String {
        names::method_display_name(self.selector(owner), &self.descriptor)
    }

    #[must_use]
    pub fn handle(&self, owner: &str) -> ElementHandle {
        ElementHandle::method(owner, &self.name, &self.descriptor)
    }
}

// ============================================================================
// Member Type Descriptor
// ============================================================================

/// Stub for a nested member type: name and access only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberTypeDescriptor {
    pub name: String,
    pub access: AccessFlags,
}

impl MemberTypeDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, access: u32) -> Self {
        Self {
            name: name.into(),
            access: AccessFlags(access),
        }
    }
}

impl PartialEq for MemberTypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for MemberTypeDescriptor {}

impl Hash for MemberTypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// ============================================================================
// Type Descriptor
// ============================================================================

/// Structural view of one compiled type.
///
/// Equality and hashing use the qualified name only, so descriptors can be
/// collected into ancestor and interface sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "TypeSnapshot", into = "TypeSnapshot")]
pub struct TypeDescriptor {
    /// Dotted qualified name, nested types separated by `$`
    pub name: String,
    pub access: AccessFlags,
    pub signature: Option<String>,
    /// Direct superclass; absent for `java.lang.Object` and interfaces
    pub super_name: Option<String>,
    pub interfaces: IndexSet<String>,
    pub fields: IndexMap<String, FieldDescriptor>,
    /// Overloads keyed by method name, in declaration order
    pub methods: IndexMap<String, Vec<MethodDescriptor>>,
    pub member_types: IndexSet<MemberTypeDescriptor>,
    pub nesting: Option<Nesting>,
}

impl TypeDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, access: u32) -> Self {
        Self {
            name: name.into(),
            access: AccessFlags(access),
            signature: None,
            super_name: None,
            interfaces: IndexSet::new(),
            fields: IndexMap::new(),
            methods: IndexMap::new(),
            member_types: IndexSet::new(),
            nesting: None,
        }
    }

    #[must_use]
    pub fn with_super(mut self, super_name: impl Into<String>) -> Self {
        self.super_name = Some(super_name.into());
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.insert(interface.into());
        self
    }

    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.add_field(field);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.add_method(method);
        self
    }

    #[must_use]
    pub fn with_member_type(mut self, member: MemberTypeDescriptor) -> Self {
        self.member_types.insert(member);
        self
    }

    #[must_use]
    pub fn with_nesting(mut self, outer_name: Option<&str>, simple_name: Option<&str>) -> Self {
        self.nesting = Some(Nesting {
            outer_name: outer_name.map(str::to_string),
            simple_name: simple_name.map(str::to_string),
        });
        self
    }

    pub fn add_field(&mut self, field: FieldDescriptor) {
        self.fields.insert(field.name.clone(), field);
    }

    pub fn add_method(&mut self, method: MethodDescriptor) {
        self.methods
            .entry(method.name.clone())
            .or_default()
            .push(method);
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Find the overload with the given name and raw descriptor.
    #[must_use]
    pub fn method(&self, name: &str, descriptor: &str) -> Option<&MethodDescriptor> {
        self.methods
            .get(name)
            .and_then(|overloads| overloads.iter().find(|m| m.descriptor == descriptor))
    }

    /// Every declared method, overloads flattened in declaration order.
    pub fn all_methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.methods.values().flatten()
    }

    #[must_use]
    pub fn member_type(&self, name: &str) -> Option<&MemberTypeDescriptor> {
        self.member_types.iter().find(|m| m.name == name)
    }

    #[must_use]
    pub const fn category(&self) -> TypeCategory {
        TypeCategory::of(self.access)
    }

    #[must_use]
    pub const fn is_interface(&self) -> bool {
        self.access.is_interface()
    }

    #[must_use]
    pub const fn is_annotation(&self) -> bool {
        self.access.is_annotation()
    }

    #[must_use]
    pub fn nest_kind(&self) -> NestKind {
        match &self.nesting {
            None => NestKind::TopLevel,
            Some(nesting) if nesting.simple_name.is_none() => NestKind::Anonymous,
            Some(nesting) if nesting.outer_name.is_none() => NestKind::Local,
            Some(_) => NestKind::Member,
        }
    }

    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.nest_kind() != NestKind::TopLevel || self.name.contains('$')
    }

    #[must_use]
    pub fn simple_name(&self) -> &str {
        names::simple_name(&self.name)
    }

    #[must_use]
    pub fn package_name(&self) -> &str {
        names::package_name(&self.name)
    }

    /// Direct superclass, treating `java.lang.Object` like an absent one.
    #[must_use]
    pub fn effective_super(&self) -> Option<&str> {
        self.super_name
            .as_deref()
            .filter(|name| *name != names::JAVA_LANG_OBJECT)
    }

    #[must_use]
    pub fn handle(&self) -> ElementHandle {
        ElementHandle::type_(&self.name)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// ============================================================================
// Snapshot form
// ============================================================================

/// Serialized layout of a [`TypeDescriptor`]: members as flat lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct TypeSnapshot {
    name: String,
    access: AccessFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<String>,
    #[serde(rename = "super", skip_serializing_if = "Option::is_none")]
    super_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    interfaces: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldDescriptor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    methods: Vec<MethodDescriptor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    member_types: Vec<MemberTypeDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nesting: Option<Nesting>,
}

impl From<TypeSnapshot> for TypeDescriptor {
    fn from(snapshot: TypeSnapshot) -> Self {
        let mut descriptor = Self::new(snapshot.name, snapshot.access.bits());
        descriptor.signature = snapshot.signature;
        descriptor.super_name = snapshot.super_name;
        descriptor.interfaces = snapshot.interfaces.into_iter().collect();
        for field in snapshot.fields {
            descriptor.add_field(field);
        }
        for method in snapshot.methods {
            descriptor.add_method(method);
        }
        descriptor.member_types = snapshot.member_types.into_iter().collect();
        descriptor.nesting = snapshot.nesting;
        descriptor
    }
}

impl From<TypeDescriptor> for TypeSnapshot {
    fn from(descriptor: TypeDescriptor) -> Self {
        Self {
            methods: descriptor.methods.into_values().flatten().collect(),
            name: descriptor.name,
            access: descriptor.access,
            signature: descriptor.signature,
            super_name: descriptor.super_name,
            interfaces: descriptor.interfaces.into_iter().collect(),
            fields: descriptor.fields.into_values().collect(),
            member_types: descriptor.member_types.into_iter().collect(),
            nesting: descriptor.nesting,
        }
    }
}
