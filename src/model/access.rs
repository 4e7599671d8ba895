//! Access flags, visibility levels and API restrictions.
//!
//! Access flags are the raw `access_flags` bitmask of a compiled type or
//! member. Visibility and restrictions are API-owner annotations that live
//! outside the class file and are supplied by a
//! [`ResolutionContext`](crate::resolve::ResolutionContext).

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Access Flags
// ============================================================================

/// Raw access-flag bitmask of a type, field or method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessFlags(pub u32);

impl AccessFlags {
    pub const PUBLIC: u32 = 0x0001;
    pub const PRIVATE: u32 = 0x0002;
    pub const PROTECTED: u32 = 0x0004;
    pub const STATIC: u32 = 0x0008;
    pub const FINAL: u32 = 0x0010;
    pub const SYNCHRONIZED: u32 = 0x0020;
    pub const VOLATILE: u32 = 0x0040;
    pub const BRIDGE: u32 = 0x0040;
    pub const TRANSIENT: u32 = 0x0080;
    pub const VARARGS: u32 = 0x0080;
    pub const NATIVE: u32 = 0x0100;
    pub const INTERFACE: u32 = 0x0200;
    pub const ABSTRACT: u32 = 0x0400;
    pub const STRICT: u32 = 0x0800;
    pub const SYNTHETIC: u32 = 0x1000;
    pub const ANNOTATION: u32 = 0x2000;
    pub const ENUM: u32 = 0x4000;

    #[must_use]
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        self.0 & flag != 0
    }

    #[must_use]
    pub const fn with(self, flag: u32) -> Self {
        Self(self.0 | flag)
    }

    #[must_use]
    pub const fn without(self, flag: u32) -> Self {
        Self(self.0 & !flag)
    }

    #[must_use]
    pub const fn is_public(self) -> bool {
        self.has(Self::PUBLIC)
    }

    #[must_use]
    pub const fn is_protected(self) -> bool {
        self.has(Self::PROTECTED)
    }

    #[must_use]
    pub const fn is_private(self) -> bool {
        self.has(Self::PRIVATE)
    }

    /// Package-private: none of public, protected or private.
    #[must_use]
    pub const fn is_default(self) -> bool {
        self.0 & (Self::PUBLIC | Self::PROTECTED | Self::PRIVATE) == 0
    }

    /// Public or protected, i.e. reachable from outside the package.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        self.is_public() || self.is_protected()
    }

    #[must_use]
    pub const fn is_static(self) -> bool {
        self.has(Self::STATIC)
    }

    #[must_use]
    pub const fn is_final(self) -> bool {
        self.has(Self::FINAL)
    }

    /// Field flag; shares its bit with `VARARGS`.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        self.has(Self::TRANSIENT)
    }

    /// Field flag; shares its bit with `BRIDGE`.
    #[must_use]
    pub const fn is_volatile(self) -> bool {
        self.has(Self::VOLATILE)
    }

    #[must_use]
    pub const fn is_native(self) -> bool {
        self.has(Self::NATIVE)
    }

    #[must_use]
    pub const fn is_synchronized(self) -> bool {
        self.has(Self::SYNCHRONIZED)
    }

    #[must_use]
    pub const fn is_abstract(self) -> bool {
        self.has(Self::ABSTRACT)
    }

    #[must_use]
    pub const fn is_interface(self) -> bool {
        self.has(Self::INTERFACE)
    }

    #[must_use]
    pub const fn is_annotation(self) -> bool {
        self.has(Self::ANNOTATION)
    }

    #[must_use]
    pub const fn is_enum(self) -> bool {
        self.has(Self::ENUM)
    }

    #[must_use]
    pub const fn is_synthetic(self) -> bool {
        self.has(Self::SYNTHETIC)
    }

    #[must_use]
    pub const fn tier(self) -> AccessTier {
        AccessTier::of(self)
    }
}

impl From<u32> for AccessFlags {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Display for AccessFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = [
            (Self::PUBLIC, "public"),
            (Self::PROTECTED, "protected"),
            (Self::PRIVATE, "private"),
            (Self::ABSTRACT, "abstract"),
            (Self::STATIC, "static"),
            (Self::FINAL, "final"),
        ]
        .iter()
        .filter(|(flag, _)| self.has(*flag))
        .map(|(_, word)| *word)
        .collect();
        write!(f, "{}", words.join(" "))
    }
}

// ============================================================================
// Access Tier
// ============================================================================

/// Ordered access level, `Private < Default < Protected < Public`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTier {
    Private,
    Default,
    Protected,
    Public,
}

impl AccessTier {
    #[must_use]
    pub const fn of(access: AccessFlags) -> Self {
        if access.is_public() {
            Self::Public
        } else if access.is_protected() {
            Self::Protected
        } else if access.is_private() {
            Self::Private
        } else {
            Self::Default
        }
    }
}

// ============================================================================
// Type Category
// ============================================================================

/// Kind of declaration a compiled type represents, derived from access bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    Annotation,
    Interface,
    Enum,
    Class,
}

impl TypeCategory {
    /// Annotation bits win over interface bits, since every annotation is
    /// also flagged as an interface.
    #[must_use]
    pub const fn of(access: AccessFlags) -> Self {
        if access.is_annotation() {
            Self::Annotation
        } else if access.is_interface() {
            Self::Interface
        } else if access.is_enum() {
            Self::Enum
        } else {
            Self::Class
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Annotation => "annotation",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Class => "class",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Visibility
// ============================================================================

/// API visibility level an owner assigns to a package or type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Publicly supported API
    Api,
    /// Service provider interface
    Spi,
    /// Internal, but accessible to selected friends
    PrivatePermissible,
    /// Internal
    Private,
}

impl Visibility {
    #[must_use]
    pub const fn bits(self) -> u16 {
        match self {
            Self::Api => 0x0001,
            Self::Spi => 0x0002,
            Self::PrivatePermissible => 0x0004,
            Self::Private => 0x0008,
        }
    }
}

/// Set of visibility levels a comparison should consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityMask(pub u16);

impl VisibilityMask {
    /// Only the publicly supported API
    pub const API: Self = Self(0x0001);
    /// Public API and service provider interfaces
    pub const API_SPI: Self = Self(0x0003);
    /// Every visibility level
    pub const ALL: Self = Self(0xFFFF);

    #[must_use]
    pub const fn contains(self, visibility: Visibility) -> bool {
        self.0 & visibility.bits() != 0
    }

    /// True when the mask is exactly the public API tier.
    #[must_use]
    pub const fn is_api_only(self) -> bool {
        self.0 == Self::API.0
    }

    #[must_use]
    pub const fn includes_api(self) -> bool {
        self.contains(Visibility::Api)
    }
}

impl Default for VisibilityMask {
    fn default() -> Self {
        Self::API
    }
}

// ============================================================================
// Restrictions
// ============================================================================

/// A single usage restriction declared by an API owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Restriction {
    NoExtend,
    NoImplement,
    NoInstantiate,
    NoReference,
}

impl Restriction {
    const ALL: [Self; 4] = [
        Self::NoExtend,
        Self::NoImplement,
        Self::NoInstantiate,
        Self::NoReference,
    ];

    #[must_use]
    pub const fn bit(self) -> u16 {
        match self {
            Self::NoExtend => 0x0001,
            Self::NoImplement => 0x0002,
            Self::NoInstantiate => 0x0004,
            Self::NoReference => 0x0008,
        }
    }
}

/// Restriction bitmask. Serialized as a list of restriction names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Restriction>", into = "Vec<Restriction>")]
pub struct Restrictions(pub u16);

impl Restrictions {
    pub const NONE: Self = Self(0);
    pub const NO_EXTEND: Self = Self(0x0001);
    pub const NO_IMPLEMENT: Self = Self(0x0002);
    pub const NO_INSTANTIATE: Self = Self(0x0004);
    pub const NO_REFERENCE: Self = Self(0x0008);

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn is_unrestricted(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_extend_restricted(self) -> bool {
        self.0 & Self::NO_EXTEND.0 != 0
    }

    #[must_use]
    pub const fn is_implement_restricted(self) -> bool {
        self.0 & Self::NO_IMPLEMENT.0 != 0
    }

    #[must_use]
    pub const fn is_instantiate_restricted(self) -> bool {
        self.0 & Self::NO_INSTANTIATE.0 != 0
    }

    #[must_use]
    pub const fn is_reference_restricted(self) -> bool {
        self.0 & Self::NO_REFERENCE.0 != 0
    }
}

impl std::ops::BitOr for Restrictions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for Restrictions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<Vec<Restriction>> for Restrictions {
    fn from(list: Vec<Restriction>) -> Self {
        Self(list.iter().fold(0, |acc, r| acc | r.bit()))
    }
}

impl From<Restrictions> for Vec<Restriction> {
    fn from(restrictions: Restrictions) -> Self {
        Restriction::ALL
            .iter()
            .copied()
            .filter(|r| restrictions.0 & r.bit() != 0)
            .collect()
    }
}

/// Owner annotations resolved for a type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiAnnotations {
    pub visibility: Visibility,
    #[serde(default)]
    pub restrictions: Restrictions,
}

impl ApiAnnotations {
    #[must_use]
    pub const fn new(visibility: Visibility, restrictions: Restrictions) -> Self {
        Self {
            visibility,
            restrictions,
        }
    }
}

impl Default for ApiAnnotations {
    fn default() -> Self {
        Self::new(Visibility::Api, Restrictions::NONE)
    }
}
