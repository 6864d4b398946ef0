use serde::{Deserialize, Serialize};
use wlgen_schema::Protocol;

use crate::{error::WlgenError, utils::quote};

/// Knobs of the generated header that are not part of the protocol itself.
///
/// Every field has a default, so an options file only needs the keys it
/// changes:
///
/// ```toml
/// namespaces = ["my", "protocols"]
/// primitives_include = "proto/primitives.hpp"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitOptions {
    /// Namespaces wrapping the declarations, outermost first.
    pub namespaces:         Vec<String>,
    /// Header defining `Wint`, `Wobject<>`, `Wopcode<>` and friends.
    pub primitives_include: String,
    /// Appended to the protocol name to form the output file name.
    pub file_suffix:        String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            namespaces:         vec!["ger".to_owned(), "wl".to_owned(), "protocols".to_owned()],
            primitives_include: "wayland/protocol_primitives.hpp".to_owned(),
            file_suffix:        "_protocol.hpp".to_owned(),
        }
    }
}

impl EmitOptions {
    pub fn from_toml_str(text: &str) -> Result<Self, WlgenError> {
        let options: EmitOptions = toml::from_str(text).map_err(|e| WlgenError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), WlgenError> {
        if let Some(ns) = self.namespaces.iter().find(|ns| ns.trim().is_empty()) {
            return Err(WlgenError::Config(format!("Invalid namespace {}", quote(ns))));
        }
        if self.file_suffix.contains('/') {
            return Err(WlgenError::Config(format!(
                "File suffix {} must not contain a path separator",
                quote(&self.file_suffix)
            )));
        }
        Ok(())
    }

    /// File name the header for `protocol` is written to.
    pub fn output_file_name(&self, protocol: &Protocol) -> String {
        format!("{}{}", protocol.name, self.file_suffix)
    }
}
