use serde::Serialize;

use crate::protocol::{Enum, Interface, Message, Protocol};

/// Numeric metadata of a protocol: opcodes, versions and enum values,
/// without any of the documentation or argument layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpcodeTable {
    pub protocol:   String,
    pub interfaces: Vec<InterfaceOpcodes>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceOpcodes {
    pub name:     String,
    pub version:  u32,
    pub requests: Vec<MessageOpcode>,
    pub events:   Vec<MessageOpcode>,
    pub enums:    Vec<EnumValues>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageOpcode {
    pub name:   String,
    pub opcode: u16,
    pub since:  Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValues {
    pub name:     String,
    pub bitfield: bool,
    pub entries:  Vec<(String, i64)>,
}

impl OpcodeTable {
    pub fn from_protocol(protocol: &Protocol) -> Self {
        OpcodeTable {
            protocol:   protocol.name.clone(),
            interfaces: protocol.interfaces.iter().map(InterfaceOpcodes::from).collect(),
        }
    }

    pub fn interface(&self, name: &str) -> Option<&InterfaceOpcodes> {
        self.interfaces.iter().find(|i| i.name == name)
    }
}

impl InterfaceOpcodes {
    pub fn request(&self, name: &str) -> Option<u16> {
        self.requests.iter().find(|r| r.name == name).map(|r| r.opcode)
    }

    pub fn event(&self, name: &str) -> Option<u16> {
        self.events.iter().find(|e| e.name == name).map(|e| e.opcode)
    }
}

impl From<&Interface> for InterfaceOpcodes {
    fn from(interface: &Interface) -> Self {
        InterfaceOpcodes {
            name:     interface.name.clone(),
            version:  interface.version,
            requests: interface.requests.iter().map(MessageOpcode::from).collect(),
            events:   interface.events.iter().map(MessageOpcode::from).collect(),
            enums:    interface.enums.iter().map(EnumValues::from).collect(),
        }
    }
}

impl From<&Message> for MessageOpcode {
    fn from(message: &Message) -> Self {
        MessageOpcode {
            name:   message.name.clone(),
            opcode: message.opcode,
            since:  message.since,
        }
    }
}

impl From<&Enum> for EnumValues {
    fn from(enumeration: &Enum) -> Self {
        EnumValues {
            name:     enumeration.name.clone(),
            bitfield: enumeration.bitfield,
            entries:  enumeration
                .entries
                .iter()
                .map(|e| (e.name.clone(), e.value))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Entry, MessageKind};

    fn message(name: &str, kind: MessageKind, opcode: u16) -> Message {
        Message {
            name: name.to_owned(),
            line: 0,
            column: 0,
            kind,
            opcode,
            ty: None,
            since: None,
            description: None,
            args: Vec::new(),
        }
    }

    fn sample() -> Protocol {
        Protocol {
            name: "demo".to_owned(),
            copyright: None,
            description: None,
            interfaces: vec![Interface {
                name: "demo_iface".to_owned(),
                line: 0,
                column: 0,
                version: 3,
                description: None,
                requests: vec![
                    message("destroy", MessageKind::Request, 0),
                    message("attach", MessageKind::Request, 1),
                ],
                events: vec![message("done", MessageKind::Event, 0)],
                enums: vec![Enum {
                    name: "mode".to_owned(),
                    line: 0,
                    column: 0,
                    since: None,
                    bitfield: true,
                    description: None,
                    entries: vec![Entry {
                        name: "a".to_owned(),
                        value: 0x10,
                        summary: None,
                        since: None,
                        description: None,
                    }],
                }],
            }],
        }
    }

    #[test]
    fn opcode_table_lookup() {
        let table = OpcodeTable::from_protocol(&sample());
        assert_eq!(table.protocol, "demo");

        let iface = table.interface("demo_iface").unwrap();
        assert_eq!(iface.version, 3);
        assert_eq!(iface.request("destroy"), Some(0));
        assert_eq!(iface.request("attach"), Some(1));
        assert_eq!(iface.event("done"), Some(0));
        assert_eq!(iface.event("destroy"), None);
        assert_eq!(iface.enums[0].entries, vec![("a".to_owned(), 16)]);
        assert!(table.interface("missing").is_none());
    }

    #[test]
    fn opcode_table_serializes() {
        let table = OpcodeTable::from_protocol(&sample());
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["interfaces"][0]["requests"][1]["name"], "attach");
        assert_eq!(json["interfaces"][0]["requests"][1]["opcode"], 1);
        assert_eq!(json["interfaces"][0]["enums"][0]["bitfield"], true);
    }
}
