//! wlgen
//!
//! Front door to the Wayland protocol compiler.
//!
//! - The model (`Protocol`, `Interface`, ...) re-exported from `wlgen-schema`
//! - Compilation to C++ headers re-exported from `wlgen-compiler`
//! - JSON renderings of a parsed protocol and of its opcode table
//!
//! ```
//! let xml = r#"<protocol name="demo">
//!   <interface name="demo_iface" version="1">
//!     <request name="destroy" type="destructor"/>
//!   </interface>
//! </protocol>"#;
//!
//! let (protocol, header) = wlgen::compile_to_header(xml, &wlgen::EmitOptions::default()).unwrap();
//! assert_eq!(protocol.interfaces[0].requests[0].opcode, 0);
//! assert!(header.contains("struct demo_iface::request::destroy {"));
//! ```

pub use wlgen_compiler::error::WlgenError;
pub use wlgen_compiler::{
    check_protocol, compile_batch, compile_protocol, compile_protocol_to_cxx, compile_to_header,
    EmitOptions,
};
pub use wlgen_schema::*;

/// Parse a protocol document and render its model as pretty-printed JSON.
pub fn protocol_to_json(text: &str) -> Result<String, WlgenError> {
    let protocol = compile_protocol(text)?;
    to_json(&protocol)
}

/// Parse a protocol document and render only its numeric metadata
/// (opcodes, versions, enum values) as pretty-printed JSON.
pub fn opcodes_to_json(text: &str) -> Result<String, WlgenError> {
    let protocol = compile_protocol(text)?;
    to_json(&OpcodeTable::from_protocol(&protocol))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, WlgenError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub mod traits {
    pub use wlgen_compiler::traits::{HeaderSink, ProtocolSource};
}

pub mod error {
    pub use wlgen_compiler::error::WlgenError;
}

pub mod schema {
    pub use wlgen_schema::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = r#"<protocol name="demo">
  <interface name="demo_iface" version="2">
    <request name="destroy" type="destructor"/>
    <request name="bind">
      <arg name="id" type="new_id"/>
    </request>
    <event name="done"/>
  </interface>
</protocol>"#;

    #[test]
    fn opcodes_json_lists_messages() {
        let json: serde_json::Value = serde_json::from_str(&opcodes_to_json(DEMO).unwrap()).unwrap();
        assert_eq!(json["protocol"], "demo");
        assert_eq!(json["interfaces"][0]["version"], 2);
        assert_eq!(json["interfaces"][0]["requests"][1]["name"], "bind");
        assert_eq!(json["interfaces"][0]["requests"][1]["opcode"], 1);
        assert_eq!(json["interfaces"][0]["events"][0]["opcode"], 0);
    }

    #[test]
    fn protocol_json_shows_expanded_args() {
        let json: serde_json::Value = serde_json::from_str(&protocol_to_json(DEMO).unwrap()).unwrap();
        let args = &json["interfaces"][0]["requests"][1]["args"];
        assert_eq!(args[0]["name"], "new_id_interface");
        assert_eq!(args[1]["name"], "new_id_interface_version");
        assert_eq!(args[2]["name"], "id");
        assert_eq!(args[2]["ty"], "NewId");
    }

    #[test]
    fn json_failures_are_reported_as_json_errors() {
        // JSON object keys must be strings
        let mut map = std::collections::BTreeMap::new();
        map.insert((1u8, 2u8), "pair");
        let err = to_json(&map).unwrap_err();
        assert!(matches!(err, WlgenError::Json(_)), "got {:?}", err);
        assert!(err.to_string().starts_with("JSON rendering failed"));
    }

    #[test]
    fn json_propagates_parse_errors() {
        assert!(protocol_to_json("<protocol name=\"x\"/>").is_err());
    }
}
