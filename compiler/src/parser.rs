use std::num::ParseIntError;

use tracing::debug;
use wlgen_schema::{Arg, ArgType, Description, Entry, Enum, Interface, Message, MessageKind, Protocol};

use crate::{
    error::WlgenError,
    utils::{error, quote},
    xml::Element,
};

/// Name of the synthesized string argument that precedes an untyped `new_id`.
pub const NEW_ID_INTERFACE_ARG: &str = "new_id_interface";
/// Name of the synthesized uint argument that precedes an untyped `new_id`.
pub const NEW_ID_VERSION_ARG: &str = "new_id_interface_version";

const NEW_ID_INTERFACE_SUMMARY: &str =
    "Interface name, e.g. from registry::global event, for following Wnew_id<>.";
const NEW_ID_VERSION_SUMMARY: &str =
    "Interface version, e.g. from registry::global event, for following Wnew_id<>.";

/// Builds a [`Protocol`] from the root `<protocol>` element.
///
/// Any structural problem aborts the whole document; there is no partial
/// result.
pub fn parse_protocol(node: &Element) -> Result<Protocol, WlgenError> {
    expect_tag(node, "protocol")?;
    let name = required_attr(node, "name")?.to_owned();

    let mut children = node.children.as_slice();

    let mut copyright = None;
    if let Some((first, rest)) = children.split_first() {
        if first.name == "copyright" {
            copyright = first.text().map(str::to_owned);
            children = rest;
        }
    }

    let mut description = None;
    if let Some((first, rest)) = children.split_first() {
        if first.name == "description" {
            description = Some(parse_description(first)?);
            children = rest;
        }
    }

    if children.is_empty() {
        return Err(WlgenError::NoInterfaces(name));
    }

    let interfaces = children
        .iter()
        .map(parse_interface)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(protocol = %name, interfaces = interfaces.len(), "parsed protocol");

    Ok(Protocol {
        name,
        copyright,
        description,
        interfaces,
    })
}

pub fn parse_interface(node: &Element) -> Result<Interface, WlgenError> {
    expect_tag(node, "interface")?;
    let name = required_attr(node, "name")?.to_owned();
    let version_str = required_attr(node, "version")?;
    let version: u32 = version_str.parse().map_err(|e: ParseIntError| {
        error(
            &format!("Invalid interface version {}: {}", quote(version_str), e),
            node.line,
            node.column,
        )
    })?;
    if version == 0 {
        return Err(error("Interface version must be positive", node.line, node.column));
    }

    if node.children.is_empty() {
        return Err(error(
            &format!("Interface {} contains no children", quote(&name)),
            node.line,
            node.column,
        ));
    }

    let (description, children) = leading_description(node)?;

    let mut requests = Vec::new();
    let mut events = Vec::new();
    let mut enums = Vec::new();

    for child in children {
        match child.name.as_str() {
            "request" => {
                let opcode = next_opcode(&requests, child)?;
                requests.push(parse_message(child, MessageKind::Request, opcode)?);
            }
            "event" => {
                let opcode = next_opcode(&events, child)?;
                events.push(parse_message(child, MessageKind::Event, opcode)?);
            }
            "enum" => enums.push(parse_enum(child)?),
            other => {
                return Err(error(
                    &format!(
                        "Expected <request>, <event> or <enum> in interface {} but found <{}>",
                        quote(&name),
                        other
                    ),
                    child.line,
                    child.column,
                ));
            }
        }
    }

    debug!(
        interface = %name,
        requests = requests.len(),
        events = events.len(),
        enums = enums.len(),
        "parsed interface"
    );

    Ok(Interface {
        name,
        line: node.line,
        column: node.column,
        version,
        description,
        requests,
        events,
        enums,
    })
}

fn next_opcode(siblings: &[Message], node: &Element) -> Result<u16, WlgenError> {
    u16::try_from(siblings.len())
        .map_err(|_| error("Too many messages of one kind in an interface", node.line, node.column))
}

/// Parses a `<request>` or `<event>`; `opcode` is its index among siblings
/// of the same kind.
pub fn parse_message(node: &Element, kind: MessageKind, opcode: u16) -> Result<Message, WlgenError> {
    expect_tag(node, kind.tag())?;
    let name = required_attr(node, "name")?.to_owned();
    let ty = node.attribute("type").map(str::to_owned);
    let since = optional_u32(node, "since")?;

    let (description, children) = leading_description(node)?;

    let mut args = Vec::new();
    for child in children {
        args.extend(parse_arg(child)?);
    }

    Ok(Message {
        name,
        line: node.line,
        column: node.column,
        kind,
        opcode,
        ty,
        since,
        description,
        args,
    })
}

/// Parses one `<arg>`.
///
/// A `new_id` without an `interface` attribute travels on the wire after
/// the interface name and version, so it comes back preceded by two
/// synthesized arguments carrying those.
pub fn parse_arg(node: &Element) -> Result<Vec<Arg>, WlgenError> {
    expect_tag(node, "arg")?;
    let description = single_description(node)?;

    let name = required_attr(node, "name")?.to_owned();
    let type_str = required_attr(node, "type")?;
    let ty = ArgType::try_from_str(type_str).ok_or_else(|| {
        error(
            &format!("Unknown argument type {}", quote(type_str)),
            node.line,
            node.column,
        )
    })?;
    let interface = node
        .attribute("interface")
        .filter(|i| !i.is_empty())
        .map(str::to_owned);
    let allow_null = optional_bool(node, "allow-null")?;

    let mut args = Vec::with_capacity(3);
    if ty == ArgType::NewId && interface.is_none() {
        args.push(synthesized_arg(node, NEW_ID_INTERFACE_ARG, ArgType::String, NEW_ID_INTERFACE_SUMMARY));
        args.push(synthesized_arg(node, NEW_ID_VERSION_ARG, ArgType::Uint, NEW_ID_VERSION_SUMMARY));
    }

    args.push(Arg {
        name,
        line: node.line,
        column: node.column,
        ty,
        summary: node.attribute("summary").map(str::to_owned),
        interface,
        allow_null,
        enum_: node.attribute("enum").map(str::to_owned),
        description,
    });
    Ok(args)
}

fn synthesized_arg(node: &Element, name: &str, ty: ArgType, summary: &str) -> Arg {
    Arg {
        name: name.to_owned(),
        line: node.line,
        column: node.column,
        ty,
        summary: Some(summary.to_owned()),
        interface: None,
        allow_null: false,
        enum_: None,
        description: None,
    }
}

pub fn parse_enum(node: &Element) -> Result<Enum, WlgenError> {
    expect_tag(node, "enum")?;
    let name = required_attr(node, "name")?.to_owned();
    let since = optional_u32(node, "since")?;
    let bitfield = optional_bool(node, "bitfield")?;

    let (description, children) = leading_description(node)?;
    let entries = children
        .iter()
        .map(parse_entry)
        .collect::<Result<Vec<_>, _>>()?;

    if entries.is_empty() {
        return Err(error(
            &format!("Enum {} has no entries", quote(&name)),
            node.line,
            node.column,
        ));
    }

    Ok(Enum {
        name,
        line: node.line,
        column: node.column,
        since,
        bitfield,
        description,
        entries,
    })
}

pub fn parse_entry(node: &Element) -> Result<Entry, WlgenError> {
    expect_tag(node, "entry")?;
    let description = single_description(node)?;

    let name = required_attr(node, "name")?.to_owned();
    let value_str = required_attr(node, "value")?;
    let value = parse_int_base_prefix(value_str).map_err(|e| {
        error(
            &format!("Invalid value {} for entry {}: {}", quote(value_str), quote(&name), e),
            node.line,
            node.column,
        )
    })?;

    Ok(Entry {
        name,
        value,
        summary: node.attribute("summary").map(str::to_owned),
        since: optional_u32(node, "since")?,
        description,
    })
}

pub fn parse_description(node: &Element) -> Result<Description, WlgenError> {
    expect_tag(node, "description")?;
    let summary = required_attr(node, "summary")?;
    Ok(Description::new(summary, node.text().map(str::to_owned)))
}

/// Parses an optionally signed integer literal: decimal, or hex/octal/binary
/// with its `0x`, `0o` or `0b` prefix after the sign.
///
/// A decimal literal with leading zeros is ambiguous (C reads it as octal)
/// and rejected, except for zero itself.
pub fn parse_int_base_prefix(int_str: &str) -> Result<i64, String> {
    let int_str = int_str.trim();
    let (negative, digits) = match int_str.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, int_str.strip_prefix('+').unwrap_or(int_str)),
    };
    let lower = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(hex) = lower.strip_prefix("0x") {
        (16, hex)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        (8, oct)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (2, bin)
    } else {
        if lower.len() > 1 && lower.starts_with('0') && lower.bytes().any(|b| b != b'0') {
            return Err("leading zeros in a decimal literal are not allowed".to_owned());
        }
        (10, lower.as_str())
    };
    // from_str_radix would accept a second sign after the prefix
    if body.starts_with(['+', '-']) {
        return Err("invalid digit found in string".to_owned());
    }
    let magnitude = i64::from_str_radix(body, radix).map_err(|e| e.to_string())?;

    Ok(if negative { -magnitude } else { magnitude })
}

fn expect_tag(node: &Element, tag: &str) -> Result<(), WlgenError> {
    if node.name != tag {
        return Err(error(
            &format!("Expected <{}> element but found <{}>", tag, node.name),
            node.line,
            node.column,
        ));
    }
    Ok(())
}

fn required_attr<'a>(node: &'a Element, attr: &str) -> Result<&'a str, WlgenError> {
    node.attribute(attr).ok_or_else(|| {
        error(
            &format!("<{}> is missing required attribute {}", node.name, quote(attr)),
            node.line,
            node.column,
        )
    })
}

fn optional_u32(node: &Element, attr: &str) -> Result<Option<u32>, WlgenError> {
    node.attribute(attr)
        .map(|value| {
            value.parse().map_err(|e: ParseIntError| {
                error(
                    &format!("Invalid {} value {}: {}", attr, quote(value), e),
                    node.line,
                    node.column,
                )
            })
        })
        .transpose()
}

fn optional_bool(node: &Element, attr: &str) -> Result<bool, WlgenError> {
    match node.attribute(attr) {
        None | Some("false") => Ok(false),
        Some("true") => Ok(true),
        Some(other) => Err(error(
            &format!("Invalid {} value {}, expected \"true\" or \"false\"", attr, quote(other)),
            node.line,
            node.column,
        )),
    }
}

/// Splits off a `<description>` sitting at index 0, if there is one.
fn leading_description(node: &Element) -> Result<(Option<Description>, &[Element]), WlgenError> {
    match node.children.split_first() {
        Some((first, rest)) if first.name == "description" => Ok((Some(parse_description(first)?), rest)),
        _ => Ok((None, node.children.as_slice())),
    }
}

/// For elements whose only permitted child is a `<description>`.
fn single_description(node: &Element) -> Result<Option<Description>, WlgenError> {
    match node.children.as_slice() {
        [] => Ok(None),
        [only] => parse_description(only).map(Some),
        [_, second, ..] => Err(error(
            &format!("<{}> contains more than one child", node.name),
            second.line,
            second.column,
        )),
    }
}
