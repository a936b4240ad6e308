//! Query pattern compilation.
//!
//! A pattern has the shape `<pkg path>:<ident>[:<field>|:<method>()]`.
//! Every segment is a regular expression anchored at both ends, so `T1`
//! never matches `T1Extra` while `pkg.*` still works as a wildcard.

use crate::error::{GedError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Member narrowing of a pattern: a struct field or a method.
#[derive(Debug, Clone)]
pub enum MemberPattern {
    /// Third segment without a `()` suffix.
    Field(Regex),
    /// Third segment with a `()` suffix (the suffix is not part of the regex).
    Method(Regex),
}

impl MemberPattern {
    /// Whether this narrows to a method.
    pub fn is_method(&self) -> bool {
        matches!(self, MemberPattern::Method(_))
    }
}

/// A compiled, immutable query.
#[derive(Debug, Clone)]
pub struct Pattern {
    pkg: Regex,
    ident: Regex,
    member: Option<MemberPattern>,
}

impl Pattern {
    /// Compile a pattern string.
    ///
    /// # Errors
    /// `InvalidPattern` when the pattern is empty, has fewer than two or more
    /// than three `:`-separated segments, has an empty segment, or a segment
    /// is not a valid regular expression.
    pub fn parse(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(GedError::invalid_pattern(pattern, "no pattern specified"));
        }

        let segs: Vec<&str> = pattern.split(':').collect();
        if segs.len() < 2 || segs.len() > 3 {
            return Err(GedError::invalid_pattern(
                pattern,
                format!("invalid pattern specified: {}", pattern),
            ));
        }

        let pkg = compile_anchored(segs[0])
            .map_err(|msg| GedError::invalid_pattern(pattern, format!("pkg pattern: {}", msg)))?;
        let ident = compile_anchored(segs[1])
            .map_err(|msg| GedError::invalid_pattern(pattern, format!("ident pattern: {}", msg)))?;

        let member = match segs.get(2) {
            None => None,
            Some(seg) => {
                let (seg, is_method) = match seg.strip_suffix("()") {
                    Some(stripped) => (stripped, true),
                    None => (*seg, false),
                };
                let re = compile_anchored(seg).map_err(|msg| {
                    GedError::invalid_pattern(pattern, format!("method or field pattern: {}", msg))
                })?;
                Some(if is_method {
                    MemberPattern::Method(re)
                } else {
                    MemberPattern::Field(re)
                })
            }
        };

        Ok(Pattern { pkg, ident, member })
    }

    /// Compiled package path regex.
    pub fn pkg(&self) -> &Regex {
        &self.pkg
    }

    /// Compiled identifier regex.
    pub fn ident(&self) -> &Regex {
        &self.ident
    }

    /// Field or method narrowing, if any.
    pub fn member(&self) -> Option<&MemberPattern> {
        self.member.as_ref()
    }

    /// Field regex when the pattern is in field mode.
    pub fn field(&self) -> Option<&Regex> {
        match &self.member {
            Some(MemberPattern::Field(re)) => Some(re),
            _ => None,
        }
    }

    /// Method regex when the pattern is in method mode.
    pub fn method(&self) -> Option<&Regex> {
        match &self.member {
            Some(MemberPattern::Method(re)) => Some(re),
            _ => None,
        }
    }

    /// Whether a declaring package and name satisfy the package and identifier parts.
    pub fn matches_symbol(&self, pkg: &str, name: &str) -> bool {
        self.pkg.is_match(pkg) && self.ident.is_match(name)
    }
}

impl FromStr for Pattern {
    type Err = GedError;

    fn from_str(s: &str) -> Result<Self> {
        Pattern::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pkg.as_str(), self.ident.as_str())?;
        match &self.member {
            Some(MemberPattern::Field(re)) => write!(f, ":{}", re.as_str()),
            Some(MemberPattern::Method(re)) => write!(f, ":{}()", re.as_str()),
            None => Ok(()),
        }
    }
}

/// Anchor a non-empty segment with `^`/`$` where missing and compile it.
fn compile_anchored(seg: &str) -> std::result::Result<Regex, String> {
    if seg.is_empty() {
        return Err("empty pattern".to_string());
    }
    let mut anchored = String::with_capacity(seg.len() + 2);
    if !seg.starts_with('^') {
        anchored.push('^');
    }
    anchored.push_str(seg);
    if !seg.ends_with('$') {
        anchored.push('$');
    }
    Regex::new(&anchored).map_err(|e| e.to_string())
}
