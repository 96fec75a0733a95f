use std::fmt;

use regex::Captures;

/// Which placeholders a template substitutes when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution {
    /// Every `$N` is replaced with capture group `N`.
    AllGroups,
    /// Every `$1` is replaced; any other placeholder stays as literal text.
    FirstGroupOnly,
    /// Only the first `$1` is replaced; everything after it stays literal.
    FirstGroupOnce,
}

impl Substitution {
    fn substitutes(self, group: usize, already: bool) -> bool {
        match self {
            Self::AllGroups => true,
            Self::FirstGroupOnly => group == 1,
            Self::FirstGroupOnce => group == 1 && !already,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Group(usize),
}

/// A compiled replacement template.
///
/// `$` followed by a single ASCII digit is a placeholder for that capture
/// group (`$0` is the whole match). Any other `$` is literal text.
///
/// ```
/// use uaclass::Template;
///
/// let t = Template::new("ABC ($1)");
/// assert!(t.has_placeholders());
/// assert_eq!(t.placeholders().collect::<Vec<_>>(), vec![1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Compile a template string. Every string is a valid template.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_owned(),
            segments: crate::parse::template_segments(source),
        }
    }

    /// The template text as written in the rule.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn has_placeholders(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Group(_)))
    }

    /// Group indices referenced by the template, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Group(n) => Some(*n),
            Segment::Literal(_) => None,
        })
    }

    /// Render the template against a match in a single left-to-right pass.
    ///
    /// Groups that do not exist or did not participate render as the empty
    /// string. Captured text is inserted verbatim.
    pub(crate) fn render(&self, caps: &Captures<'_>, mode: Substitution) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut substituted = false;
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Group(n) if mode.substitutes(*n, substituted) => {
                    out.push_str(caps.get(*n).map_or("", |m| m.as_str()));
                    substituted = true;
                }
                Segment::Group(n) => {
                    out.push('$');
                    out.push_str(&n.to_string());
                }
            }
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;

    fn render(template: &str, pattern: &str, input: &str, mode: Substitution) -> String {
        let caps = Regex::new(pattern).unwrap().captures(input).unwrap();
        Template::new(template).render(&caps, mode)
    }

    #[test]
    fn literal_template_has_no_placeholders() {
        let t = Template::new("CatOS 9000");
        assert!(!t.has_placeholders());
        assert_eq!(t.as_str(), "CatOS 9000");
    }

    #[test]
    fn substitutes_single_group() {
        let out = render("ABC ($1)", r"ABC([0-9]+)", "ABC123", Substitution::AllGroups);
        assert_eq!(out, "ABC (123)");
    }

    #[test]
    fn substitutes_multiple_groups() {
        let out = render(
            "$1 $2",
            r"(iPhone)(\d+,\d+)",
            "iPhone10,8",
            Substitution::AllGroups,
        );
        assert_eq!(out, "iPhone 10,8");
    }

    #[test]
    fn out_of_range_group_renders_empty() {
        let out = render("x$2y", r"(a)", "a", Substitution::AllGroups);
        assert_eq!(out, "xy");
    }

    #[test]
    fn non_participating_group_renders_empty() {
        let out = render("[$2]", r"(a)(b)?", "a", Substitution::AllGroups);
        assert_eq!(out, "[]");
    }

    #[test]
    fn group_zero_is_whole_match() {
        let out = render("<$0>", r"b+", "abbc", Substitution::AllGroups);
        assert_eq!(out, "<bb>");
    }

    #[test]
    fn dollar_without_digit_is_literal() {
        let out = render("$ $x $1", r"(z)", "z", Substitution::AllGroups);
        assert_eq!(out, "$ $x z");
    }

    #[test]
    fn trailing_dollar_is_literal() {
        let t = Template::new("cost$");
        assert!(!t.has_placeholders());
    }

    #[test]
    fn captured_text_is_not_reinterpreted() {
        let out = render("Cash $1", r"([$0-9]+)", "$2", Substitution::AllGroups);
        assert_eq!(out, "Cash $2");
    }

    #[test]
    fn first_group_only_keeps_other_placeholders() {
        let out = render("$1-$2", r"(a)(b)", "ab", Substitution::FirstGroupOnly);
        assert_eq!(out, "a-$2");
    }

    #[test]
    fn first_group_only_replaces_every_occurrence() {
        let out = render("$1/$1", r"(q)", "q", Substitution::FirstGroupOnly);
        assert_eq!(out, "q/q");
    }

    #[test]
    fn first_group_once_leaves_later_occurrences() {
        let out = render("$1 $1", r"(Foo)", "Foo", Substitution::FirstGroupOnce);
        assert_eq!(out, "Foo $1");
    }

    #[test]
    fn first_group_once_keeps_other_placeholders() {
        let out = render("$2$1$1", r"(a)(b)", "ab", Substitution::FirstGroupOnce);
        assert_eq!(out, "$2a$1");
    }

    #[test]
    fn two_digit_reference_is_group_then_digit() {
        let out = render("$10", r"(x)", "x", Substitution::AllGroups);
        assert_eq!(out, "x0");
    }

    #[test]
    fn placeholders_in_order() {
        let t = Template::new("$3 and $1");
        assert_eq!(t.placeholders().collect::<Vec<_>>(), vec![3, 1]);
    }
}
