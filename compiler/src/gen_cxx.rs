use tracing::debug;
use wlgen_schema::{Arg, Entry, Enum, Interface, Message, MessageKind, Protocol};

use crate::{
    description::{commentify, doc_comment, summary_or_description, DOC_MARKER},
    error::WlgenError,
    options::EmitOptions,
    type_map::{arg_type, enum_underlying_type, SCOPE_SEPARATOR},
};

const INDENT: usize = 4;

/// Compiles a protocol into one C++ header.
///
/// The header first forward-declares the nested types of *every*
/// interface (pass 1) and only then defines them (pass 2), so a message may
/// name any interface or enum of the protocol regardless of document order.
pub fn compile_protocol_to_cxx(protocol: &Protocol, options: &EmitOptions) -> Result<String, WlgenError> {
    if protocol.interfaces.is_empty() {
        return Err(WlgenError::NoInterfaces(protocol.name.clone()));
    }

    let mut code = emit_banner(protocol, options);

    debug!(protocol = %protocol.name, "emitting forward declarations");
    code.push_str(&emit_skeletons(&protocol.interfaces));

    debug!(protocol = %protocol.name, "emitting definitions");
    code.push_str(&emit_definitions(&protocol.interfaces)?);

    for ns in options.namespaces.iter().rev() {
        code.push_str(&format!("}} // namespace {}\n", ns));
    }

    Ok(code)
}

/// Everything before the first declaration: origin note, file docs,
/// copyright, include and the opening namespaces.
pub fn emit_banner(protocol: &Protocol, options: &EmitOptions) -> String {
    let mut code = format!("// Generated from Wayland xml protocol: {}\n\n", protocol.name);

    match &protocol.description {
        Some(description) => {
            code.push_str(&doc_comment(description, &format!("@file\n{} ", DOC_MARKER), 0));
            code.push('\n');
        }
        None => {
            code.push_str(&format!("{} @file\n{} {} xml protocol\n\n", DOC_MARKER, DOC_MARKER, protocol.name));
        }
    }

    if let Some(copyright) = &protocol.copyright {
        code.push_str(&commentify(copyright, DOC_MARKER));
        code.push('\n');
    }

    code.push_str("#pragma once\n\n");
    code.push_str(&format!("#include \"{}\"\n\n", options.primitives_include));

    for ns in &options.namespaces {
        code.push_str(&format!("namespace {} {{\n", ns));
    }
    code.push('\n');
    code.push_str(&format!("{} Declare everything before they might be used.\n\n", DOC_MARKER));
    code
}

/// Pass 1: for each interface, in document order, its enum declarations and
/// the name-only declarations of its request and event structs.
pub fn emit_skeletons(interfaces: &[Interface]) -> String {
    interfaces.iter().map(interface_skeleton).collect()
}

/// Pass 2: for each interface, in document order, its enum definitions,
/// then its requests, then its events.
pub fn emit_definitions(interfaces: &[Interface]) -> Result<String, WlgenError> {
    let mut code = String::new();
    for interface in interfaces {
        for enumeration in &interface.enums {
            code.push_str(&enum_definition(enumeration, &interface.name)?);
        }
        for message in interface.messages() {
            code.push_str(&message_definition(message, &interface.name));
        }
    }
    Ok(code)
}

fn interface_skeleton(interface: &Interface) -> String {
    let indent = " ".repeat(INDENT);
    let mut code = String::new();

    if let Some(description) = &interface.description {
        code.push_str(&doc_comment(description, "", 0));
    }
    code.push_str(&format!("struct {} {{\n", interface.name));

    for enumeration in &interface.enums {
        code.push_str(&format!(
            "{}enum class {} : {};\n",
            indent,
            enumeration.name,
            enum_underlying_type(enumeration)
        ));
    }
    if !interface.enums.is_empty() {
        code.push('\n');
    }

    code.push_str(&message_group(&interface.requests, MessageKind::Request));
    code.push('\n');
    code.push_str(&message_group(&interface.events, MessageKind::Event));

    code.push_str("};\n");
    code
}

fn message_group(messages: &[Message], kind: MessageKind) -> String {
    let indent = " ".repeat(INDENT);
    let mut code = format!("{}struct {} {{\n", indent, kind.tag());
    for message in messages {
        code.push_str(&format!("{}{}struct {};\n", indent, indent, message.name));
    }
    code.push_str(&format!("{}}};\n", indent));
    code
}

fn enum_definition(enumeration: &Enum, interface: &str) -> Result<String, WlgenError> {
    let (last, init) = enumeration.entries.split_last().ok_or_else(|| WlgenError::EmptyEnum {
        interface: interface.to_owned(),
        name:      enumeration.name.clone(),
    })?;

    let mut code = String::new();
    if let Some(description) = &enumeration.description {
        code.push_str(&doc_comment(description, "", 0));
    }
    code.push_str(&format!(
        "enum class {}{}{} : {} {{\n",
        interface,
        SCOPE_SEPARATOR,
        enumeration.name,
        enum_underlying_type(enumeration)
    ));
    for entry in init {
        code.push_str(&entry_line(entry, false));
    }
    code.push_str(&entry_line(last, true));
    code.push_str("};\n\n");
    Ok(code)
}

fn entry_line(entry: &Entry, last: bool) -> String {
    let separator = if last { "" } else { "," };
    format!(
        "{}{}E{} = {}{}\n",
        summary_or_description(entry.summary.as_deref(), entry.description.as_ref(), INDENT),
        " ".repeat(INDENT),
        entry.name,
        entry.value,
        separator
    )
}

fn message_definition(message: &Message, interface: &str) -> String {
    let indent = " ".repeat(INDENT);
    let mut code = String::new();
    if let Some(description) = &message.description {
        code.push_str(&doc_comment(description, "", 0));
    }
    code.push_str(&format!(
        "struct {}{sep}{}{sep}{} {{\n",
        interface,
        message.kind.tag(),
        message.name,
        sep = SCOPE_SEPARATOR
    ));
    code.push_str(&format!(
        "{}static constexpr Wopcode<{}> opcode{{ {} }};\n",
        indent, interface, message.opcode
    ));
    for arg in &message.args {
        code.push_str(&data_member(arg, interface));
    }
    code.push_str("};\n\n");
    code
}

fn data_member(arg: &Arg, interface: &str) -> String {
    format!(
        "{}{}{} {};\n",
        summary_or_description(arg.summary.as_deref(), arg.description.as_ref(), INDENT),
        " ".repeat(INDENT),
        arg_type(arg, interface),
        arg.name
    )
}
