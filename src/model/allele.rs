use std::fmt;

/// The literal serialized form of the symbolic "any unseen allele" token,
/// the gVCF convention this merger is modeled on.
pub const NON_REF_LITERAL: &str = "<NON_REF>";

/// A single allele: an uppercase nucleotide string, or the symbolic
/// "any unseen allele" token.
///
/// Modeled as a first-class enum case rather than a magic string compared
/// at every call site, the same way the teacher keeps its own allele type
/// as a dedicated struct instead of a bare `String`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Allele {
    Bases(String),
    NonRef,
}

impl Allele {
    pub fn bases(s: impl Into<String>) -> Self {
        Allele::Bases(s.into())
    }

    pub fn is_non_ref(&self) -> bool {
        matches!(self, Allele::NonRef)
    }

    /// The sequence this allele stands for, if it is not the symbolic one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Allele::Bases(s) => Some(s.as_str()),
            Allele::NonRef => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Allele::Bases(s) => s.len(),
            Allele::NonRef => 0,
        }
    }

    /// Parses an allele from its serialized form, recognizing the
    /// configured symbolic literal.
    pub fn parse(s: &str, non_ref_literal: &str) -> Self {
        if s == non_ref_literal {
            Allele::NonRef
        } else {
            Allele::Bases(s.to_ascii_uppercase())
        }
    }

    /// Renders the allele back to its external, serialized form.
    pub fn render(&self, non_ref_literal: &str) -> String {
        match self {
            Allele::Bases(s) => s.clone(),
            Allele::NonRef => non_ref_literal.to_string(),
        }
    }

    /// Appends `suffix` to a sequence allele; a no-op (returns self) for
    /// the symbolic allele, which is never padded.
    pub fn padded(&self, suffix: &str) -> Allele {
        match self {
            Allele::Bases(s) => {
                if suffix.is_empty() {
                    Allele::Bases(s.clone())
                } else {
                    let mut out = String::with_capacity(s.len() + suffix.len());
                    out.push_str(s);
                    out.push_str(suffix);
                    Allele::Bases(out)
                }
            }
            Allele::NonRef => Allele::NonRef,
        }
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Allele::Bases(s) => write!(f, "{s}"),
            Allele::NonRef => write!(f, "{NON_REF_LITERAL}"),
        }
    }
}
