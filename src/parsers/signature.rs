//! Generic signature decoder.
//!
//! Decodes class, method and field signatures (JVMS §4.7.9.1) into a
//! [`SignatureDescriptor`]. Class-type tokens are routed by the mode the
//! decoder is in when it meets them:
//!
//! - class bound of a formal type parameter (a `java.lang.Object` bound is dropped),
//! - interface bound of a formal type parameter,
//! - superclass (the first reference of a non-method signature),
//! - type argument (`+` covariant, `-` contravariant, exact, or `*` unbounded).
//!
//! Type arguments are recorded as source text, e.g. `? extends java.lang.Number`.
//! Decoding never fails: malformed input yields whatever was decoded before
//! the first unexpected character.

use crate::model::names::JAVA_LANG_OBJECT;
use crate::model::{SignatureDescriptor, TypeParameterDescriptor};

/// Decode a generic signature string.
#[must_use]
pub fn decode_signature(signature: &str) -> SignatureDescriptor {
    let mut decoder = Decoder::new(signature);
    if decoder.decode().is_none() {
        tracing::debug!(signature, "malformed generic signature, keeping partial decode");
    }
    decoder.descriptor
}

/// Where the class type being decoded ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    ClassBound,
    InterfaceBound,
    Superclass,
    /// A top-level reference: interface, parameter, return or field type
    Reference,
    /// Inside another type's argument list or a bound; rendered only
    Nested,
}

impl Mode {
    const fn collects_arguments(self) -> bool {
        matches!(self, Self::Superclass | Self::Reference)
    }
}

/// Wildcard indicator preceding a type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wildcard {
    Unbounded,
    Covariant,
    Contravariant,
    Exact,
}

impl Wildcard {
    const fn of(c: u8) -> Self {
        match c {
            b'*' => Self::Unbounded,
            b'+' => Self::Covariant,
            b'-' => Self::Contravariant,
            _ => Self::Exact,
        }
    }

    fn render(self, bound: &str) -> String {
        match self {
            Self::Unbounded => "?".to_string(),
            Self::Covariant => format!("? extends {bound}"),
            Self::Contravariant => format!("? super {bound}"),
            Self::Exact => bound.to_string(),
        }
    }
}

struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
    descriptor: SignatureDescriptor,
}

impl<'a> Decoder<'a> {
    fn new(signature: &'a str) -> Self {
        Self {
            input: signature.as_bytes(),
            pos: 0,
            descriptor: SignatureDescriptor::default(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn expect(&mut self, expected: u8) -> Option<()> {
        (self.bump()? == expected).then_some(())
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Read up to (not including) one of `stops`.
    fn identifier(&mut self, stops: &[u8]) -> Option<&'a str> {
        let start = self.pos;
        while !stops.contains(&self.peek()?) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.input[start..self.pos]).ok()
    }

    fn decode(&mut self) -> Option<()> {
        if self.peek() == Some(b'<') {
            self.formal_type_parameters()?;
        }
        if self.peek() == Some(b'(') {
            return self.method_signature();
        }
        if self.at_end() {
            return Some(());
        }
        self.reference_type(Mode::Superclass)?;
        while !self.at_end() {
            self.reference_type(Mode::Reference)?;
        }
        Some(())
    }

    fn formal_type_parameters(&mut self) -> Option<()> {
        self.expect(b'<')?;
        while self.peek()? != b'>' {
            let name = self.identifier(b":")?;
            self.descriptor
                .type_parameters
                .push(TypeParameterDescriptor::new(name));
            self.expect(b':')?;
            // the class bound may be empty, e.g. `T::Ljava/lang/Comparable;`
            if !matches!(self.peek()?, b':' | b'>') && !self.starts_parameter() {
                self.reference_type(Mode::ClassBound)?;
            }
            while self.peek()? == b':' {
                self.bump();
                self.reference_type(Mode::InterfaceBound)?;
            }
        }
        self.expect(b'>')
    }

    /// True when the cursor sits on the next formal parameter's name.
    fn starts_parameter(&self) -> bool {
        let rest = &self.input[self.pos..];
        match rest.iter().position(|&c| matches!(c, b':' | b';' | b'<' | b'>')) {
            Some(i) => rest[i] == b':' && !matches!(rest[0], b'L' | b'T' | b'['),
            None => false,
        }
    }

    fn method_signature(&mut self) -> Option<()> {
        self.expect(b'(')?;
        while self.peek()? != b')' {
            self.type_signature(Mode::Reference)?;
        }
        self.expect(b')')?;
        self.type_signature(Mode::Reference)?;
        while self.peek() == Some(b'^') {
            self.bump();
            self.type_signature(Mode::Nested)?;
        }
        Some(())
    }

    /// Any type signature, including primitives and `void`.
    fn type_signature(&mut self, mode: Mode) -> Option<String> {
        let primitive = match self.peek()? {
            b'B' => "byte",
            b'C' => "char",
            b'D' => "double",
            b'F' => "float",
            b'I' => "int",
            b'J' => "long",
            b'S' => "short",
            b'Z' => "boolean",
            b'V' => "void",
            _ => return self.reference_type(mode),
        };
        self.bump();
        Some(primitive.to_string())
    }

    fn reference_type(&mut self, mode: Mode) -> Option<String> {
        match self.peek()? {
            b'L' => self.class_type(mode),
            b'T' => {
                self.bump();
                let name = self.identifier(b";")?.to_string();
                self.expect(b';')?;
                self.route_variable(mode, &name);
                Some(name)
            }
            b'[' => {
                self.bump();
                let component = self.type_signature(mode)?;
                Some(format!("{component}[]"))
            }
            _ => None,
        }
    }

    fn class_type(&mut self, mode: Mode) -> Option<String> {
        self.expect(b'L')?;
        let mut rendered = String::new();
        let mut erased = String::new();
        let mut arguments = Vec::new();
        loop {
            let segment = self.identifier(b"<.;")?.replace('/', ".");
            rendered.push_str(&segment);
            erased.push_str(&segment);
            if self.peek()? == b'<' {
                self.bump();
                let mut segment_arguments = Vec::new();
                while self.peek()? != b'>' {
                    segment_arguments.push(self.type_argument()?);
                }
                self.bump();
                rendered.push('<');
                rendered.push_str(&segment_arguments.join(", "));
                rendered.push('>');
                arguments.extend(segment_arguments);
            }
            match self.bump()? {
                b';' => break,
                b'.' => {
                    rendered.push('.');
                    erased.push('$');
                }
                _ => return None,
            }
        }
        self.route_class(mode, erased, &rendered, arguments);
        Some(rendered)
    }

    fn type_argument(&mut self) -> Option<String> {
        let wildcard = Wildcard::of(self.peek()?);
        match wildcard {
            Wildcard::Unbounded => {
                self.bump();
                return Some(wildcard.render(""));
            }
            Wildcard::Covariant | Wildcard::Contravariant => {
                self.bump();
            }
            Wildcard::Exact => {}
        }
        let bound = self.reference_type(Mode::Nested)?;
        Some(wildcard.render(&bound))
    }

    fn route_class(&mut self, mode: Mode, erased: String, rendered: &str, arguments: Vec<String>) {
        if mode.collects_arguments() {
            self.descriptor.type_arguments.extend(arguments);
        }
        match mode {
            Mode::ClassBound => {
                if erased != JAVA_LANG_OBJECT {
                    self.set_class_bound(rendered.to_string());
                }
            }
            Mode::InterfaceBound => self.add_interface_bound(rendered.to_string()),
            Mode::Superclass => self.descriptor.superclass = Some(erased),
            Mode::Reference | Mode::Nested => {}
        }
    }

    fn route_variable(&mut self, mode: Mode, name: &str) {
        match mode {
            Mode::ClassBound => self.set_class_bound(name.to_string()),
            Mode::InterfaceBound => self.add_interface_bound(name.to_string()),
            Mode::Superclass | Mode::Reference | Mode::Nested => {}
        }
    }

    fn set_class_bound(&mut self, bound: String) {
        if let Some(parameter) = self.descriptor.type_parameters.last_mut() {
            parameter.class_bound = Some(bound);
        }
    }

    fn add_interface_bound(&mut self, bound: String) {
        if let Some(parameter) = self.descriptor.type_parameters.last_mut() {
            parameter.interface_bounds.push(bound);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_signature_with_bounds() {
        let decoded = decode_signature(
            "<T:Ljava/lang/Number;:Ljava/lang/Comparable<TT;>;U:Ljava/lang/Object;>Ljava/util/AbstractList<TT;>;Ljava/io/Serializable;",
        );
        assert_eq!(decoded.type_parameters.len(), 2);

        let t = &decoded.type_parameters[0];
        assert_eq!(t.name, "T");
        assert_eq!(t.class_bound.as_deref(), Some("java.lang.Number"));
        assert_eq!(t.interface_bounds, vec!["java.lang.Comparable<T>"]);

        let u = &decoded.type_parameters[1];
        assert_eq!(u.name, "U");
        assert_eq!(u.class_bound, None);

        assert_eq!(decoded.superclass.as_deref(), Some("java.util.AbstractList"));
        assert_eq!(decoded.type_arguments, vec!["T"]);
    }

    #[test]
    fn test_object_bound_matches_unbounded() {
        assert_eq!(
            decode_signature("<T:Ljava/lang/Object;>Ljava/lang/Object;"),
            decode_signature("<T:>Ljava/lang/Object;")
        );
    }

    #[test]
    fn test_interface_only_bound() {
        let decoded = decode_signature("<E::Ljava/lang/Runnable;>Ljava/lang/Object;");
        let e = &decoded.type_parameters[0];
        assert_eq!(e.class_bound, None);
        assert_eq!(e.interface_bounds, vec!["java.lang.Runnable"]);
    }

    #[test]
    fn test_method_signature() {
        let decoded = decode_signature(
            "<K:Ljava/lang/Object;V:Ljava/lang/Object;>(Ljava/util/Map<TK;+TV;>;I)Ljava/util/List<*>;^Ljava/io/IOException;",
        );
        let names: Vec<&str> = decoded.type_parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["K", "V"]);
        assert_eq!(decoded.superclass, None);
        assert_eq!(decoded.type_arguments, vec!["K", "? extends V", "?"]);
    }

    #[test]
    fn test_field_signature_wildcards() {
        let decoded =
            decode_signature("Ljava/util/Map<-Ljava/lang/Integer;[Ljava/lang/String;>;");
        assert!(!decoded.has_type_parameters());
        assert_eq!(
            decoded.type_arguments,
            vec!["? super java.lang.Integer", "java.lang.String[]"]
        );
    }

    #[test]
    fn test_inner_class_arguments() {
        let decoded = decode_signature("Lp/Outer<Ljava/lang/String;>.Inner<Ljava/lang/Long;>;");
        assert_eq!(decoded.superclass.as_deref(), Some("p.Outer$Inner"));
        assert_eq!(decoded.type_arguments, vec!["java.lang.String", "java.lang.Long"]);
    }

    #[test]
    fn test_malformed_input_is_partial() {
        let decoded = decode_signature("<T:Ljava/lang/Number;>Ljava/util/List<");
        assert_eq!(decoded.type_parameters.len(), 1);
        assert_eq!(decoded.superclass, None);

        assert_eq!(decode_signature(""), SignatureDescriptor::default());
        let _ = decode_signature("<<<;;");
    }
}
