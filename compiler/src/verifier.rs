use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use wlgen_schema::{Interface, Protocol};

use crate::{error::WlgenError, utils::quote};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
    static ref ENTRY_NAME: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
}

/// C++ keywords that would break a generated data member if used as an
/// argument name.
pub const RESERVED_IDENTIFIERS: &[&str] = &[
    "alignas", "alignof", "auto", "bool", "break", "case", "catch", "char",
    "class", "const", "constexpr", "continue", "decltype", "default", "delete", "do",
    "double", "else", "enum", "explicit", "export", "extern", "false", "float",
    "for", "friend", "goto", "if", "inline", "int", "long", "namespace",
    "new", "noexcept", "nullptr", "operator", "private", "protected", "public", "return",
    "short", "signed", "sizeof", "static", "struct", "switch", "template", "this",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned",
    "using", "virtual", "void", "volatile", "while",
];

/// Checks what the parser leaves unchecked: unique interface names, names
/// usable as C++ identifiers, argument names clear of C++ keywords, and
/// enum references into interfaces of this protocol.
///
/// References into interfaces the protocol does not define are accepted,
/// those live in other documents.
pub fn verify_protocol(protocol: &Protocol) -> Result<(), WlgenError> {
    let mut interfaces: HashMap<&str, &Interface> = HashMap::new();

    // 1) Duplicate interface names
    for interface in &protocol.interfaces {
        if interfaces.insert(interface.name.as_str(), interface).is_some() {
            return Err(WlgenError::VerifierError(format!(
                "The interface {} is defined twice (line {})",
                quote(&interface.name),
                interface.line
            )));
        }
    }

    for interface in &protocol.interfaces {
        // 2) Names that become identifiers
        check_identifier(&interface.name, "interface", interface.line)?;
        for enumeration in &interface.enums {
            check_identifier(&enumeration.name, "enum", enumeration.line)?;
            for entry in &enumeration.entries {
                if !ENTRY_NAME.is_match(&entry.name) {
                    return Err(WlgenError::VerifierError(format!(
                        "The entry name {} in enum {} is not a valid identifier suffix",
                        quote(&entry.name),
                        quote(&enumeration.name)
                    )));
                }
            }
        }

        for message in interface.messages() {
            check_identifier(&message.name, message.kind.tag(), message.line)?;

            for arg in &message.args {
                check_identifier(&arg.name, "argument", arg.line)?;

                // 3) Reserved identifiers
                if RESERVED_IDENTIFIERS.contains(&arg.name.as_str()) {
                    return Err(WlgenError::VerifierError(format!(
                        "The argument name {} of {}.{} is a reserved C++ identifier (line {})",
                        quote(&arg.name),
                        interface.name,
                        message.name,
                        arg.line
                    )));
                }

                // 4) Enum references into this protocol
                if let Some(enum_ref) = &arg.enum_ {
                    let (owner, enum_name) = match enum_ref.split_once('.') {
                        Some((owner, enum_name)) => (owner, enum_name),
                        None => (interface.name.as_str(), enum_ref.as_str()),
                    };
                    if let Some(owner_interface) = interfaces.get(owner) {
                        if owner_interface.find_enum(enum_name).is_none() {
                            return Err(WlgenError::VerifierError(format!(
                                "The enum {} referenced by argument {} of {}.{} is not defined (line {})",
                                quote(enum_ref),
                                quote(&arg.name),
                                interface.name,
                                message.name,
                                arg.line
                            )));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn check_identifier(name: &str, what: &str, line: usize) -> Result<(), WlgenError> {
    if !IDENTIFIER.is_match(name) {
        return Err(WlgenError::VerifierError(format!(
            "The {} name {} is not a valid identifier (line {})",
            what,
            quote(name),
            line
        )));
    }
    Ok(())
}
