//! Reserved words of the source language.
//!
//! The keyword table is a static sorted slice; lookup is a binary search
//! over the spelling. Keywords are case-sensitive.

use std::fmt;

/// A reserved word.
///
/// The variants cover the full reserved-word set of the surface language,
/// not only the keywords the parser currently gives meaning to — using a
/// reserved word as an identifier must fail to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Keyword {
    Abort,
    Abs,
    Abstract,
    Accept,
    Access,
    Aliased,
    All,
    And,
    Array,
    At,
    Begin,
    Body,
    Case,
    Constant,
    Declare,
    Delay,
    Delta,
    Digits,
    Do,
    Else,
    Elsif,
    End,
    Entry,
    Exception,
    Exit,
    For,
    Function,
    Generic,
    Goto,
    If,
    In,
    Interface,
    Is,
    Limited,
    Loop,
    Mod,
    New,
    Not,
    Null,
    Of,
    Or,
    Others,
    Out,
    Overriding,
    Package,
    Parallel,
    Pragma,
    Private,
    Procedure,
    Protected,
    Raise,
    Range,
    Record,
    Rem,
    Renames,
    Requeue,
    Return,
    Reverse,
    Select,
    Separate,
    Some,
    Subtype,
    Synchronized,
    Tagged,
    Task,
    Terminate,
    Then,
    Type,
    Until,
    Use,
    When,
    While,
    With,
    Xor,
}

/// Keyword spellings, sorted so `keyword_from_ident` can binary-search.
static KEYWORDS: &[(&str, Keyword)] = &[
    ("abort", Keyword::Abort),
    ("abs", Keyword::Abs),
    ("abstract", Keyword::Abstract),
    ("accept", Keyword::Accept),
    ("access", Keyword::Access),
    ("aliased", Keyword::Aliased),
    ("all", Keyword::All),
    ("and", Keyword::And),
    ("array", Keyword::Array),
    ("at", Keyword::At),
    ("begin", Keyword::Begin),
    ("body", Keyword::Body),
    ("case", Keyword::Case),
    ("constant", Keyword::Constant),
    ("declare", Keyword::Declare),
    ("delay", Keyword::Delay),
    ("delta", Keyword::Delta),
    ("digits", Keyword::Digits),
    ("do", Keyword::Do),
    ("else", Keyword::Else),
    ("elsif", Keyword::Elsif),
    ("end", Keyword::End),
    ("entry", Keyword::Entry),
    ("exception", Keyword::Exception),
    ("exit", Keyword::Exit),
    ("for", Keyword::For),
    ("function", Keyword::Function),
    ("generic", Keyword::Generic),
    ("goto", Keyword::Goto),
    ("if", Keyword::If),
    ("in", Keyword::In),
    ("interface", Keyword::Interface),
    ("is", Keyword::Is),
    ("limited", Keyword::Limited),
    ("loop", Keyword::Loop),
    ("mod", Keyword::Mod),
    ("new", Keyword::New),
    ("not", Keyword::Not),
    ("null", Keyword::Null),
    ("of", Keyword::Of),
    ("or", Keyword::Or),
    ("others", Keyword::Others),
    ("out", Keyword::Out),
    ("overriding", Keyword::Overriding),
    ("package", Keyword::Package),
    ("parallel", Keyword::Parallel),
    ("pragma", Keyword::Pragma),
    ("private", Keyword::Private),
    ("procedure", Keyword::Procedure),
    ("protected", Keyword::Protected),
    ("raise", Keyword::Raise),
    ("range", Keyword::Range),
    ("record", Keyword::Record),
    ("rem", Keyword::Rem),
    ("renames", Keyword::Renames),
    ("requeue", Keyword::Requeue),
    ("return", Keyword::Return),
    ("reverse", Keyword::Reverse),
    ("select", Keyword::Select),
    ("separate", Keyword::Separate),
    ("some", Keyword::Some),
    ("subtype", Keyword::Subtype),
    ("synchronized", Keyword::Synchronized),
    ("tagged", Keyword::Tagged),
    ("task", Keyword::Task),
    ("terminate", Keyword::Terminate),
    ("then", Keyword::Then),
    ("type", Keyword::Type),
    ("until", Keyword::Until),
    ("use", Keyword::Use),
    ("when", Keyword::When),
    ("while", Keyword::While),
    ("with", Keyword::With),
    ("xor", Keyword::Xor),
];

/// Looks up an identifier spelling in the keyword table.
///
/// Returns `None` if the text is an ordinary identifier.
///
/// # Example
///
/// ```
/// use arcada_lex::keyword::{keyword_from_ident, Keyword};
///
/// assert_eq!(keyword_from_ident("procedure"), Some(Keyword::Procedure));
/// assert_eq!(keyword_from_ident("Procedure"), None);
/// assert_eq!(keyword_from_ident("proc"), None);
/// ```
pub fn keyword_from_ident(text: &str) -> Option<Keyword> {
    KEYWORDS
        .binary_search_by(|(spelling, _)| spelling.cmp(&text))
        .ok()
        .map(|index| KEYWORDS[index].1)
}

impl Keyword {
    /// Returns the source spelling of the keyword.
    pub fn as_str(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(_, keyword)| *keyword == self)
            .map(|(spelling, _)| *spelling)
            .unwrap_or("<keyword>")
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
