use std::fmt::{self, Display};

/// A single piece of a path pattern.
///
/// A segment refers to the value between two `/` in the path. For example `/blog/[id]` contains
/// two segments: a literal `blog` and a dynamic `id`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches one path segment with exactly this text.
    Literal(String),
    /// `[name]`: matches any one path segment and binds it.
    Dynamic(String),
    /// `[...name]`: matches one or more trailing path segments and binds them as a list.
    CatchAll(String),
    /// `[[...name]]`: like [`Segment::CatchAll`], but also matches when no segments remain.
    OptionalCatchAll(String),
}

impl Segment {
    /// Classify a single segment of a pattern.
    ///
    /// ```rust
    /// # use router_mock::route_definition::Segment;
    /// assert_eq!(Segment::parse("blog"), Segment::Literal("blog".into()));
    /// assert_eq!(Segment::parse("[id]"), Segment::Dynamic("id".into()));
    /// assert_eq!(Segment::parse("[...slug]"), Segment::CatchAll("slug".into()));
    /// assert_eq!(Segment::parse("[[...slug]]"), Segment::OptionalCatchAll("slug".into()));
    /// ```
    pub fn parse(text: &str) -> Self {
        if let Some(name) = text
            .strip_prefix("[[...")
            .and_then(|rest| rest.strip_suffix("]]"))
            .filter(|name| is_name(name))
        {
            return Self::OptionalCatchAll(name.to_string());
        }

        if let Some(inner) = text.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            if let Some(name) = inner.strip_prefix("...").filter(|name| is_name(name)) {
                return Self::CatchAll(name.to_string());
            }
            if is_name(inner) && !inner.starts_with("...") {
                return Self::Dynamic(inner.to_string());
            }
        }

        Self::Literal(text.to_string())
    }

    /// The variable name bound by this segment, if it binds one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Dynamic(name) | Self::CatchAll(name) | Self::OptionalCatchAll(name) => {
                Some(name)
            }
        }
    }

    /// Whether this segment consumes the rest of the path.
    pub fn is_catch_all(&self) -> bool {
        matches!(self, Self::CatchAll(_) | Self::OptionalCatchAll(_))
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Dynamic(name) => write!(f, "[{name}]"),
            Self::CatchAll(name) => write!(f, "[...{name}]"),
            Self::OptionalCatchAll(name) => write!(f, "[[...{name}]]"),
        }
    }
}

// brackets inside a name would make the segment ambiguous, so those stay literal
fn is_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['[', ']', '/'])
}
