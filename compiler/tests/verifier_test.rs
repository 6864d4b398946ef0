#![cfg(test)]

use wlgen_compiler::{check_protocol, compile_protocol, error::WlgenError, verifier::verify_protocol};

const DEMO: &str = include_str!("fixtures/demo.xml");

fn verifier_message(xml: &str) -> String {
    let protocol = compile_protocol(xml).expect("compile_protocol failed");
    match verify_protocol(&protocol) {
        Err(WlgenError::VerifierError(msg)) => msg,
        other => panic!("expected a VerifierError but got {:?}", other),
    }
}

#[test]
fn test_fixture_verifies() {
    let protocol = check_protocol(DEMO, true).expect("fixture should verify");
    assert_eq!(protocol.interfaces.len(), 3);
}

#[test]
fn test_duplicate_interface() {
    let xml = r#"<protocol name="p">
  <interface name="twice" version="1"><event name="a"/></interface>
  <interface name="twice" version="2"><event name="b"/></interface>
</protocol>"#;
    let msg = verifier_message(xml);
    assert!(msg.contains("\"twice\" is defined twice (line 3)"), "{}", msg);
}

#[test]
fn test_reserved_argument_name() {
    let xml = r#"<protocol name="p">
  <interface name="i" version="1">
    <request name="set">
      <arg name="class" type="uint"/>
    </request>
  </interface>
</protocol>"#;
    let msg = verifier_message(xml);
    assert!(msg.contains("\"class\" of i.set is a reserved C++ identifier (line 4)"), "{}", msg);

    // the permissive path keeps the name as it is
    assert!(check_protocol(xml, false).is_ok());
}

#[test]
fn test_invalid_identifiers() {
    let msg = verifier_message(
        r#"<protocol name="p"><interface name="bad-name" version="1"><event name="e"/></interface></protocol>"#,
    );
    assert!(msg.contains("interface name \"bad-name\""), "{}", msg);

    let msg = verifier_message(
        r#"<protocol name="p"><interface name="i" version="1"><event name="e"><arg name="2nd" type="int"/></event></interface></protocol>"#,
    );
    assert!(msg.contains("argument name \"2nd\""), "{}", msg);

    // entry names are prefixed, so a leading digit is fine
    let protocol = compile_protocol(
        r#"<protocol name="p"><interface name="i" version="1"><enum name="e"><entry name="90" value="1"/></enum></interface></protocol>"#,
    )
    .unwrap();
    assert!(verify_protocol(&protocol).is_ok());
}

#[test]
fn test_dangling_local_enum_reference() {
    let xml = r#"<protocol name="p">
  <interface name="i" version="1">
    <enum name="mode"><entry name="a" value="0"/></enum>
    <request name="set">
      <arg name="value" type="uint" enum="missing"/>
    </request>
  </interface>
  <interface name="j" version="1">
    <event name="e">
      <arg name="value" type="uint" enum="i.absent"/>
    </event>
  </interface>
</protocol>"#;
    let msg = verifier_message(xml);
    assert!(msg.contains("\"missing\""), "{}", msg);

    let xml = xml.replace("enum=\"missing\"", "enum=\"mode\"");
    let msg = verifier_message(&xml);
    assert!(msg.contains("\"i.absent\""), "{}", msg);
    assert!(msg.contains("of j.e"), "{}", msg);
}

#[test]
fn test_reference_into_other_document_is_accepted() {
    let xml = r#"<protocol name="p">
  <interface name="i" version="1">
    <request name="set">
      <arg name="format" type="uint" enum="wl_shm.format"/>
    </request>
  </interface>
</protocol>"#;
    assert!(check_protocol(xml, true).is_ok());
}
