use tracing::{debug, info};
use wlgen_schema::Protocol;

use crate::{
    error::WlgenError,
    gen_cxx::compile_protocol_to_cxx,
    options::EmitOptions,
    parser::parse_protocol,
    traits::{HeaderSink, ProtocolSource},
    verifier::verify_protocol,
    xml::read_document,
};

/// Parse a protocol document into its model.
/// Returns `Err(WlgenError)` if the markup is malformed or the document
/// breaks the protocol structure.
pub fn compile_protocol(text: &str) -> Result<Protocol, WlgenError> {
    let root = read_document(text)?;
    parse_protocol(&root)
}

/// Like [`compile_protocol`], for raw document bytes.
pub fn compile_protocol_bytes(bytes: Vec<u8>) -> Result<Protocol, WlgenError> {
    let text = String::from_utf8(bytes)?;
    compile_protocol(&text)
}

/// Parse, and with `verify` also run [`verify_protocol`], without emitting.
pub fn check_protocol(text: &str, verify: bool) -> Result<Protocol, WlgenError> {
    let protocol = compile_protocol(text)?;
    if verify {
        verify_protocol(&protocol)?;
    }
    Ok(protocol)
}

/// Compile a protocol document into `(Protocol, header)`.
pub fn compile_to_header(text: &str, options: &EmitOptions) -> Result<(Protocol, String), WlgenError> {
    let protocol = compile_protocol(text)?;
    let header = compile_protocol_to_cxx(&protocol, options)?;
    Ok((protocol, header))
}

/// Compiles every named document in order and hands each header to `sink`.
///
/// Stops at the first failing document. Headers written before the failure
/// are not rolled back. Returns the written file names.
pub fn compile_batch<S, K>(
    names: &[String],
    mut source: S,
    mut sink: K,
    options: &EmitOptions,
    verify: bool,
) -> Result<Vec<String>, WlgenError>
where
    S: ProtocolSource,
    K: HeaderSink,
{
    let mut written = Vec::with_capacity(names.len());

    for name in names {
        debug!(source = %name, "compiling protocol document");
        let protocol = compile_protocol_bytes(source.fetch(name)?)?;
        if verify {
            verify_protocol(&protocol)?;
        }
        let header = compile_protocol_to_cxx(&protocol, options)?;

        let file_name = options.output_file_name(&protocol);
        sink.write(&file_name, &header)?;
        info!(source = %name, header = %file_name, "generated header");
        written.push(file_name);
    }

    Ok(written)
}
