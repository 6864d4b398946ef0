//! Domain model of Wayland protocol documents.
//!
//! A [`Protocol`] owns its interfaces, which own their requests, events and
//! enums. The tree has no back references: an argument's `enum` attribute
//! stays a string and is only turned into a qualified name when code is
//! emitted.
//!
//! ```
//! use wlgen_schema::*;
//!
//! let destroy = Message {
//!     name: "destroy".to_owned(),
//!     line: 1,
//!     column: 1,
//!     kind: MessageKind::Request,
//!     opcode: 0,
//!     ty: Some("destructor".to_owned()),
//!     since: None,
//!     description: None,
//!     args: vec![],
//! };
//! assert!(destroy.is_destructor());
//! assert_eq!(destroy.kind.tag(), "request");
//! assert_eq!(ArgType::try_from_str("new_id"), Some(ArgType::NewId));
//! ```

pub mod opcodes;
pub mod protocol;

pub use opcodes::*;
pub use protocol::*;
