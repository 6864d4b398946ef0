use wlgen_schema::{Arg, ArgType, Enum};

/// Separator between a C++ scope and the name inside it.
pub const SCOPE_SEPARATOR: &str = "::";

/// Maps a wire type to its C++ wrapper. `Wobject`/`Wnew_id` are templates
/// left empty when the interface is not statically known.
pub fn wire_type(ty: ArgType, interface: Option<&str>) -> String {
    match ty {
        ArgType::Int    => "Wint".to_string(),
        ArgType::Uint   => "Wuint".to_string(),
        ArgType::Fixed  => "Wfixed".to_string(),
        ArgType::String => "Wstring".to_string(),
        ArgType::Object => format!("Wobject<{}>", interface.unwrap_or("")),
        ArgType::NewId  => format!("Wnew_id<{}>", interface.unwrap_or("")),
        ArgType::Array  => "Warray".to_string(),
        ArgType::Fd     => "Wfd".to_string(),
    }
}

/// Qualifies an enum reference as seen from `interface`.
///
/// `"error"` becomes `"{interface}::error"`, `"wl_shm.format"` becomes
/// `"wl_shm::format"`. Nothing checks that the referenced enum exists.
pub fn qualify_enum_ref(enum_ref: &str, interface: &str) -> String {
    if enum_ref.contains('.') {
        enum_ref.replace('.', SCOPE_SEPARATOR)
    } else {
        format!("{}{}{}", interface, SCOPE_SEPARATOR, enum_ref)
    }
}

/// Type of the data member generated for `arg` inside a message of
/// `interface`. An enum reference takes precedence over the wire type.
pub fn arg_type(arg: &Arg, interface: &str) -> String {
    match &arg.enum_ {
        Some(enum_ref) => qualify_enum_ref(enum_ref, interface),
        None => wire_type(arg.ty, arg.interface.as_deref()),
    }
}

/// Wire type an enum is carried as: bitfields as `uint`, the rest as `int`.
pub fn enum_wire_type(enumeration: &Enum) -> ArgType {
    if enumeration.bitfield {
        ArgType::Uint
    } else {
        ArgType::Int
    }
}

/// Underlying type of the generated `enum class`.
pub fn enum_underlying_type(enumeration: &Enum) -> String {
    format!("{}::integral_type", wire_type(enum_wire_type(enumeration), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(ty: ArgType, interface: Option<&str>, enum_: Option<&str>) -> Arg {
        Arg {
            name: "value".to_owned(),
            line: 0,
            column: 0,
            ty,
            summary: None,
            interface: interface.map(str::to_owned),
            allow_null: false,
            enum_: enum_.map(str::to_owned),
            description: None,
        }
    }

    fn enumeration(bitfield: bool) -> Enum {
        Enum {
            name: "mode".to_owned(),
            line: 0,
            column: 0,
            since: None,
            bitfield,
            description: None,
            entries: Vec::new(),
        }
    }

    #[test]
    fn test_primitive_wire_types() {
        assert_eq!(wire_type(ArgType::Int, None), "Wint");
        assert_eq!(wire_type(ArgType::Uint, None), "Wuint");
        assert_eq!(wire_type(ArgType::Fixed, None), "Wfixed");
        assert_eq!(wire_type(ArgType::String, None), "Wstring");
        assert_eq!(wire_type(ArgType::Array, None), "Warray");
        assert_eq!(wire_type(ArgType::Fd, None), "Wfd");
    }

    #[test]
    fn test_object_and_new_id_types() {
        assert_eq!(wire_type(ArgType::Object, Some("wl_surface")), "Wobject<wl_surface>");
        assert_eq!(wire_type(ArgType::Object, None), "Wobject<>");
        assert_eq!(wire_type(ArgType::NewId, Some("wl_buffer")), "Wnew_id<wl_buffer>");
        assert_eq!(wire_type(ArgType::NewId, None), "Wnew_id<>");
    }

    #[test]
    fn test_enum_reference_qualification() {
        assert_eq!(qualify_enum_ref("error", "wl_display"), "wl_display::error");
        assert_eq!(qualify_enum_ref("wl_shm.format", "wl_shm_pool"), "wl_shm::format");
        assert_eq!(qualify_enum_ref("a.b.c", "x"), "a::b::c");
    }

    #[test]
    fn test_arg_type_prefers_enum() {
        assert_eq!(arg_type(&arg(ArgType::Uint, None, Some("format")), "wl_shm"), "wl_shm::format");
        assert_eq!(arg_type(&arg(ArgType::Uint, None, None), "wl_shm"), "Wuint");
        assert_eq!(
            arg_type(&arg(ArgType::Object, Some("wl_output"), None), "wl_surface"),
            "Wobject<wl_output>"
        );
    }

    #[test]
    fn test_enum_underlying_type() {
        assert_eq!(enum_underlying_type(&enumeration(true)), "Wuint::integral_type");
        assert_eq!(enum_underlying_type(&enumeration(false)), "Wint::integral_type");
        assert_eq!(enum_wire_type(&enumeration(true)), ArgType::Uint);
        assert_eq!(enum_wire_type(&enumeration(false)), ArgType::Int);
    }
}
