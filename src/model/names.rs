//! Helpers for qualified names and raw field/method descriptors.

use crate::error::{ApiDiffError, Result};

/// The universal root type every class ultimately extends.
pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";

/// Root of the unchecked exception hierarchy.
pub const JAVA_LANG_RUNTIME_EXCEPTION: &str = "java.lang.RuntimeException";

/// Root of the unchecked error hierarchy.
pub const JAVA_LANG_ERROR: &str = "java.lang.Error";

/// Reserved name of instance initializers.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Reserved name of static initializers.
pub const CLINIT_NAME: &str = "<clinit>";

/// Package part of a qualified type name, empty for the default package.
#[must_use]
pub fn package_name(qualified: &str) -> &str {
    qualified.rfind('.').map_or("", |idx| &qualified[..idx])
}

/// Simple name of a type, the segment after the last `.` or `$`.
#[must_use]
pub fn simple_name(qualified: &str) -> &str {
    let start = qualified
        .rfind(|c: char| c == '.' || c == '$')
        .map_or(0, |idx| idx + 1);
    &qualified[start..]
}

/// Convert an internal name (`java/lang/String`) to a dotted one.
#[must_use]
pub fn dotted(internal: &str) -> String {
    internal.replace('/', ".")
}

/// Decode a single field descriptor (`I`, `[Ljava/lang/String;`) into its
/// source rendering, returning the rendering and the unconsumed remainder.
fn decode_field_type(descriptor: &str) -> Result<(String, &str)> {
    let mut dims = 0usize;
    let mut rest = descriptor;
    while let Some(stripped) = rest.strip_prefix('[') {
        dims += 1;
        rest = stripped;
    }

    let mut chars = rest.chars();
    let head = chars
        .next()
        .ok_or_else(|| ApiDiffError::invalid_descriptor(descriptor, "unexpected end"))?;
    let (base, remainder) = match head {
        'B' => ("byte".to_string(), &rest[1..]),
        'C' => ("char".to_string(), &rest[1..]),
        'D' => ("double".to_string(), &rest[1..]),
        'F' => ("float".to_string(), &rest[1..]),
        'I' => ("int".to_string(), &rest[1..]),
        'J' => ("long".to_string(), &rest[1..]),
        'S' => ("short".to_string(), &rest[1..]),
        'Z' => ("boolean".to_string(), &rest[1..]),
        'V' => ("void".to_string(), &rest[1..]),
        'L' => {
            let end = rest
                .find(';')
                .ok_or_else(|| ApiDiffError::invalid_descriptor(descriptor, "missing ';'"))?;
            (dotted(&rest[1..end]), &rest[end + 1..])
        }
        other => {
            return Err(ApiDiffError::invalid_descriptor(
                descriptor,
                format!("unexpected character '{other}'"),
            ))
        }
    };

    Ok((format!("{base}{}", "[]".repeat(dims)), remainder))
}

/// Render a field descriptor as a source type name.
pub fn field_type_name(descriptor: &str) -> Result<String> {
    let (name, rest) = decode_field_type(descriptor)?;
    if rest.is_empty() {
        Ok(name)
    } else {
        Err(ApiDiffError::invalid_descriptor(descriptor, "trailing characters"))
    }
}

/// Source renderings of the parameter types of a method descriptor.
pub fn parameter_types(descriptor: &str) -> Result<Vec<String>> {
    let mut rest = descriptor
        .strip_prefix('(')
        .ok_or_else(|| ApiDiffError::invalid_descriptor(descriptor, "missing '('"))?;

    let mut params = Vec::new();
    loop {
        if let Some(after) = rest.strip_prefix(')') {
            // return type must still be well formed
            field_type_name(after)?;
            return Ok(params);
        }
        let (param, remainder) = decode_field_type(rest)?;
        params.push(param);
        rest = remainder;
    }
}

/// Human-readable method name, e.g. `m(int, java.lang.String)`.
///
/// Falls back to `selector + descriptor` when the descriptor is malformed.
#[must_use]
pub fn method_display_name(selector: &str, descriptor: &str) -> String {
    match parameter_types(descriptor) {
        Ok(params) => format!("{selector}({})", params.join(", ")),
        Err(_) => format!("{selector}{descriptor}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_and_package_names() {
        assert_eq!(simple_name("com.example.Outer$Inner"), "Inner");
        assert_eq!(simple_name("Top"), "Top");
        assert_eq!(package_name("com.example.Outer"), "com.example");
        assert_eq!(package_name("Top"), "");
    }

    #[test]
    fn test_method_display_name() {
        assert_eq!(method_display_name("m", "()V"), "m()");
        assert_eq!(
            method_display_name("put", "(ILjava/lang/String;[[J)Z"),
            "put(int, java.lang.String, long[][])"
        );
    }

    #[test]
    fn test_malformed_descriptor_falls_back() {
        assert_eq!(method_display_name("m", "(Lfoo"), "m(Lfoo");
        assert!(parameter_types("I)V").is_err());
        assert!(field_type_name("Q").is_err());
    }

    #[test]
    fn test_field_type_name() {
        assert_eq!(field_type_name("[Ljava/util/List;").unwrap(), "java.util.List[]");
        assert_eq!(field_type_name("D").unwrap(), "double");
    }
}
