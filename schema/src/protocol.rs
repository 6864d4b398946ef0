use serde::Serialize;

/// One parsed protocol document. Built once by the parser and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Protocol {
    pub name:        String,
    pub copyright:   Option<String>,
    pub description: Option<Description>,
    pub interfaces:  Vec<Interface>,
}

/// A `<description>` element: the required `summary` attribute plus the
/// optional free text between the tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub summary: String,
    pub body:    Option<String>,
}

impl Description {
    pub fn new(summary: impl Into<String>, body: Option<String>) -> Self {
        Description {
            summary: summary.into(),
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interface {
    pub name:        String,
    pub line:        usize,
    pub column:      usize,
    pub version:     u32,
    pub description: Option<Description>,
    pub requests:    Vec<Message>,
    pub events:      Vec<Message>,
    pub enums:       Vec<Enum>,
}

impl Interface {
    pub fn find_enum(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Requests followed by events, each carrying its own opcode.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.requests.iter().chain(self.events.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MessageKind {
    Request,
    Event,
}

impl MessageKind {
    /// Element tag of this kind in the XML, also the name of the nested
    /// struct the emitter groups messages under.
    pub fn tag(self) -> &'static str {
        match self {
            MessageKind::Request => "request",
            MessageKind::Event   => "event",
        }
    }
}

/// A request or an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub name:        String,
    pub line:        usize,
    pub column:      usize,
    pub kind:        MessageKind,
    /// Zero-based position among the siblings of the same kind.
    pub opcode:      u16,
    /// The `type` attribute, e.g. `destructor`.
    pub ty:          Option<String>,
    pub since:       Option<u32>,
    pub description: Option<Description>,
    pub args:        Vec<Arg>,
}

impl Message {
    pub fn is_destructor(&self) -> bool {
        self.ty.as_deref() == Some("destructor")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArgType {
    Int,
    Uint,
    Fixed,
    String,
    Object,
    NewId,
    Array,
    Fd,
}

impl ArgType {
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "int"    => Some(Self::Int),
            "uint"   => Some(Self::Uint),
            "fixed"  => Some(Self::Fixed),
            "string" => Some(Self::String),
            "object" => Some(Self::Object),
            "new_id" => Some(Self::NewId),
            "array"  => Some(Self::Array),
            "fd"     => Some(Self::Fd),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int    => "int",
            Self::Uint   => "uint",
            Self::Fixed  => "fixed",
            Self::String => "string",
            Self::Object => "object",
            Self::NewId  => "new_id",
            Self::Array  => "array",
            Self::Fd     => "fd",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arg {
    pub name:        String,
    pub line:        usize,
    pub column:      usize,
    pub ty:          ArgType,
    pub summary:     Option<String>,
    /// Interface of an `object` or `new_id` argument, when statically known.
    pub interface:   Option<String>,
    pub allow_null:  bool,
    /// Either `enum_name` (owning interface) or `interface.enum_name`.
    #[serde(rename = "enum")]
    pub enum_:       Option<String>,
    pub description: Option<Description>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enum {
    pub name:        String,
    pub line:        usize,
    pub column:      usize,
    pub since:       Option<u32>,
    pub bitfield:    bool,
    pub description: Option<Description>,
    pub entries:     Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub name:        String,
    /// Signed so that entries of non-bitfield enums may be negative.
    pub value:       i64,
    pub summary:     Option<String>,
    pub since:       Option<u32>,
    pub description: Option<Description>,
}
