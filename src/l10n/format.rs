//! printf-style positional substitution for snippet templates.
//!
//! A directive reads `%[flags][width][.precision]verb`:
//!
//! - flags: `-` (pad right), `0` (pad numbers with zeros), `+` (always
//!   sign numbers), ` ` (space for the sign of positive numbers), `#`
//!   (`0x` prefix for `%x`)
//! - verbs: `%s`, `%v` and `%d` render through `Display`, `%f` renders a
//!   decimal number (six decimals unless a precision is given), `%x` / `%X`
//!   render integers in hex and other texts as hex bytes, `%q` renders a
//!   double-quoted string and `%%` a literal percent sign
//!
//! An explicit 1-based argument index may follow the flags or precede the
//! verb (`%[2]s`, `%-[1]8s`). Precision truncates `%s`/`%v` texts and
//! rounds numbers.
//!
//! Argument mismatches are rendered inline instead of raising an error:
//!
//! - missing argument: `%!s(MISSING)`
//! - unused arguments: `%!(EXTRA a, b)` appended to the output
//! - unknown verb, or `%f` with a non-numeric argument: `%!z(value)`
//! - index that is not a positive integer: `%!(BADINDEX)`
//! - dangling `%` at the end: `%!(NOVERB)`

use std::fmt::{
    Display,
    Write as _,
};
use std::iter::Peekable;
use std::str::Chars;

/// Decimals rendered by `%f` without an explicit precision.
const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Substitutes `args` into `template`.
///
/// A template is returned verbatim when `args` is empty, so plain texts
/// containing a literal `%` need no escaping.
///
/// # Examples
/// ```
/// use voice_skill_kit::l10n::format_template;
///
/// assert_eq!(format_template("Hello %s!", &[&"Ada"]), "Hello Ada!");
/// assert_eq!(format_template("%[2]s %[1]s", &[&"world", &"hello"]), "hello world");
/// assert_eq!(format_template("%.1f degrees", &[&21.46]), "21.5 degrees");
/// assert_eq!(format_template("100%", &[]), "100%");
/// ```
#[must_use]
pub fn format_template(template: &str, args: &[&dyn Display]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_arg = 0usize;
    let mut reordered = false;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let (verb, spec) = match parse_directive(&mut chars) {
            Directive::Percent => {
                out.push('%');
                continue;
            }
            Directive::NoVerb { indexed } => {
                reordered |= indexed;
                out.push_str("%!(NOVERB)");
                continue;
            }
            Directive::BadIndex => {
                reordered = true;
                out.push_str("%!(BADINDEX)");
                continue;
            }
            Directive::Verb { verb, spec, index } => {
                if let Some(index) = index {
                    reordered = true;
                    next_arg = index;
                }
                (verb, spec)
            }
        };

        let Some(arg) = args.get(next_arg) else {
            let _ = write!(out, "%!{verb}(MISSING)");
            continue;
        };
        next_arg += 1;
        spec.render(&mut out, verb, *arg);
    }

    if !reordered && next_arg < args.len() {
        let extra = args
            .iter()
            .skip(next_arg)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(out, "%!(EXTRA {extra})");
    }

    out
}

/// One directive read after a `%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    /// `%%`
    Percent,
    /// A verb with its options.
    Verb {
        /// Conversion character, e.g. `s`.
        verb: char,
        /// Flags, width and precision.
        spec: Spec,
        /// 0-based argument index given as `[n]`.
        index: Option<usize>,
    },
    /// The template ended before a verb.
    NoVerb {
        /// Whether an explicit index was read before the end.
        indexed: bool,
    },
    /// `[..]` that is not a positive integer; the rest of the directive is
    /// consumed.
    BadIndex,
}

/// Marker for an unusable `[..]` argument index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BadIndex;

/// Flags, width and precision of one directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Spec {
    /// `-`
    left: bool,
    /// `0`
    zero: bool,
    /// `+`
    plus: bool,
    /// ` `
    space: bool,
    /// `#`
    alternate: bool,
    /// Minimum rendered width in characters.
    width: Option<usize>,
    /// Decimals of `%f`, maximum characters of `%s`/`%v`.
    precision: Option<usize>,
}

impl Spec {
    /// Records one flag character.
    const fn set_flag(&mut self, flag: char) {
        match flag {
            '-' => self.left = true,
            '0' => self.zero = true,
            '+' => self.plus = true,
            ' ' => self.space = true,
            '#' => self.alternate = true,
            _ => {}
        }
    }

    /// Appends `arg` rendered as `verb`.
    fn render(&self, out: &mut String, verb: char, arg: &dyn Display) {
        let body = match verb {
            's' | 'v' => self.text(arg),
            'd' => self.signed(self.text(arg)),
            'f' | 'F' => {
                let Ok(value) = arg.to_string().parse::<f64>() else {
                    let _ = write!(out, "%!{verb}({arg})");
                    return;
                };
                let precision = self.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
                self.signed(format!("{value:.precision$}"))
            }
            'x' => hex(&arg.to_string(), self.alternate),
            'X' => hex(&arg.to_string(), self.alternate).to_uppercase(),
            'q' => quote(&arg.to_string()),
            other => {
                let _ = write!(out, "%!{other}({arg})");
                return;
            }
        };
        self.pad(out, &body, matches!(verb, 'd' | 'f' | 'F' | 'x' | 'X'));
    }

    /// `Display` output, truncated or rounded to the precision.
    fn text(&self, arg: &dyn Display) -> String {
        self.precision.map_or_else(|| arg.to_string(), |precision| format!("{arg:.precision$}"))
    }

    /// Applies `+` and ` ` to non-negative numbers.
    fn signed(&self, body: String) -> String {
        let unsigned = body.starts_with(|c: char| c.is_ascii_digit());
        if unsigned && self.plus {
            format!("+{body}")
        } else if unsigned && self.space {
            format!(" {body}")
        } else {
            body
        }
    }

    /// Pads `body` to the width. Zero padding goes after the sign and the
    /// `0x` prefix and applies to numeric verbs only.
    fn pad(&self, out: &mut String, body: &str, numeric: bool) {
        let Some(width) = self.width else {
            out.push_str(body);
            return;
        };

        let _ = if self.left {
            write!(out, "{body:<width$}")
        } else if self.zero && numeric {
            let sign_len = usize::from(body.starts_with(['+', '-', ' ']));
            let has_prefix = self.alternate
                && body.get(sign_len..).is_some_and(|rest| rest.starts_with("0x") || rest.starts_with("0X"));
            let prefix_len = sign_len + if has_prefix { 2 } else { 0 };
            let (prefix, digits) = body.split_at(prefix_len);
            let digits_width = width.saturating_sub(prefix_len);
            write!(out, "{prefix}{digits:0>digits_width$}")
        } else {
            write!(out, "{body:>width$}")
        };
    }
}

/// Reads flags, index, width, precision and verb after a `%`.
fn parse_directive(chars: &mut Peekable<Chars<'_>>) -> Directive {
    if chars.next_if_eq(&'%').is_some() {
        return Directive::Percent;
    }

    let mut spec = Spec::default();
    while let Some(flag) = chars.next_if(|c| matches!(c, '-' | '+' | ' ' | '#' | '0')) {
        spec.set_flag(flag);
    }

    let Ok(mut index) = parse_index(chars) else {
        return skip_bad_index(chars);
    };
    spec.width = parse_number(chars);
    if chars.next_if_eq(&'.').is_some() {
        spec.precision = Some(parse_number(chars).unwrap_or(0));
    }
    match parse_index(chars) {
        Ok(Some(before_verb)) => index = Some(before_verb),
        Ok(None) => {}
        Err(BadIndex) => return skip_bad_index(chars),
    }

    chars
        .next()
        .map_or(Directive::NoVerb { indexed: index.is_some() }, |verb| Directive::Verb { verb, spec, index })
}

/// Reads an optional `[n]` and returns the 0-based index.
fn parse_index(chars: &mut Peekable<Chars<'_>>) -> Result<Option<usize>, BadIndex> {
    if chars.next_if_eq(&'[').is_none() {
        return Ok(None);
    }

    let mut digits = String::new();
    for c in chars.by_ref() {
        if c == ']' {
            let valid = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
            return digits
                .parse::<usize>()
                .ok()
                .filter(|_| valid)
                .and_then(|n| n.checked_sub(1))
                .map(Some)
                .ok_or(BadIndex);
        }
        digits.push(c);
    }
    Err(BadIndex)
}

/// Consumes what is left of a directive whose index was unusable.
fn skip_bad_index(chars: &mut Peekable<Chars<'_>>) -> Directive {
    parse_number(chars);
    if chars.next_if_eq(&'.').is_some() {
        parse_number(chars);
    }
    chars.next();
    Directive::BadIndex
}

/// Reads a run of ASCII digits.
fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut digits = String::new();
    while let Some(digit) = chars.next_if(char::is_ascii_digit) {
        digits.push(digit);
    }
    digits.parse().ok()
}

/// Integers in lower-case hex, anything else as the hex of its UTF-8 bytes.
fn hex(text: &str, alternate: bool) -> String {
    let prefix = if alternate { "0x" } else { "" };
    text.parse::<i128>().map_or_else(
        |_| {
            text.bytes().fold(prefix.to_string(), |mut acc, byte| {
                let _ = write!(acc, "{byte:02x}");
                acc
            })
        },
        |n| {
            let sign = if n < 0 { "-" } else { "" };
            format!("{sign}{prefix}{:x}", n.unsigned_abs())
        },
    )
}

/// Double-quotes `text`, escaping `"`, `\` and control characters.
/// Every other character is kept as is.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_ascii_control() => {
                let _ = write!(quoted, "\\x{:02x}", u32::from(c));
            }
            c if c.is_control() => {
                let _ = write!(quoted, "\\u{:04x}", u32::from(c));
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn render(template: &str, args: &[&str]) -> String {
        let args: Vec<&dyn Display> = args.iter().map(|a| -> &dyn Display { a }).collect();
        format_template(template, &args)
    }

    #[rstest]
    #[case::no_placeholder("Get this", &[], "Get this")]
    #[case::single("Hello %s", &["one"], "Hello one")]
    #[case::two("%s and %s", &["one", "two"], "one and two")]
    #[case::percent_literal("%s is 100%%", &["one"], "one is 100%")]
    #[case::number_verb("%d items", &["3"], "3 items")]
    #[case::quoted("say %q", &["one"], "say \"one\"")]
    #[case::explicit_index("%[2]s then %[1]s", &["one", "two"], "two then one")]
    #[case::index_then_width("%[2]5s|", &["one", "two"], "  two|")]
    #[case::flag_then_index("%-[1]5s|", &["one"], "one  |")]
    #[case::missing("%s %s %s", &["one", "two"], "one two %!s(MISSING)")]
    #[case::unknown_verb("%z", &["one", "two"], "%!z(one)%!(EXTRA two)")]
    #[case::unknown_verb_with_flags("%-5z", &["one"], "%!z(one)")]
    #[case::dangling("trailing %", &["one"], "trailing %!(NOVERB)%!(EXTRA one)")]
    #[case::bad_index("%[x]s", &["one"], "%!(BADINDEX)")]
    #[case::bad_index_keeps_rest("%[x]5.2s rest", &["one"], "%!(BADINDEX) rest")]
    #[case::zero_index("%[0]d", &["one"], "%!(BADINDEX)")]
    #[case::unclosed_index("%[1", &["one"], "%!(BADINDEX)")]
    fn formats_template(#[case] template: &str, #[case] args: &[&str], #[case] expected: &str) {
        assert_that!(render(template, args), eq(expected));
    }

    #[rstest]
    #[case::right_aligned("%5s|", &["ab"], "   ab|")]
    #[case::left_aligned("%-8s|", &["ab"], "ab      |")]
    #[case::truncated("%.3s", &["abcdef"], "abc")]
    #[case::width_and_truncation("%5.2s|", &["abcdef"], "   ab|")]
    #[case::wider_than_width("%2s", &["abcdef"], "abcdef")]
    fn pads_and_truncates_texts(#[case] template: &str, #[case] args: &[&str], #[case] expected: &str) {
        assert_that!(render(template, args), eq(expected));
    }

    #[rstest]
    #[case::precision("Temp %.1f degrees", 21.46, "Temp 21.5 degrees")]
    #[case::default_precision("%f", 3.0, "3.000000")]
    #[case::width_and_precision("%8.3f|", 3.14159, "   3.142|")]
    #[case::zero_padded("%08.2f", -3.14159, "-0003.14")]
    #[case::plus_sign("%+.1f", 2.0, "+2.0")]
    fn formats_floats(#[case] template: &str, #[case] arg: f64, #[case] expected: &str) {
        assert_that!(format_template(template, &[&arg]), eq(expected));
    }

    #[rstest]
    #[case::width("%5d|", 42, "   42|")]
    #[case::left("%-5d|", 42, "42   |")]
    #[case::zero_padded("%05d", 42, "00042")]
    #[case::zero_padded_negative("%05d", -42, "-0042")]
    #[case::plus_sign("%+d", 42, "+42")]
    #[case::plus_sign_negative("%+d", -42, "-42")]
    #[case::space_sign("% d", 42, " 42")]
    #[case::hex("%x", 255, "ff")]
    #[case::upper_hex("%X", 255, "FF")]
    #[case::alternate_hex("%#x", 255, "0xff")]
    #[case::zero_padded_alternate_hex("%#06x", 255, "0x00ff")]
    #[case::negative_hex("%x", -255, "-ff")]
    fn formats_integers(#[case] template: &str, #[case] arg: i64, #[case] expected: &str) {
        assert_that!(format_template(template, &[&arg]), eq(expected));
    }

    #[rstest]
    #[case::hex_bytes("%x", "hi", "6869")]
    #[case::upper_hex_bytes("%X", "hi", "6869")]
    #[case::non_numeric_float("%.2f", "abc", "%!f(abc)")]
    #[case::escaped_quotes("%q", "say \"hi\"", "\"say \\\"hi\\\"\"")]
    #[case::escaped_backslash("%q", "a\\b", "\"a\\\\b\"")]
    #[case::escaped_newline("%q", "one\ntwo", "\"one\\ntwo\"")]
    #[case::escaped_control("%q", "nul\u{0}", "\"nul\\x00\"")]
    #[case::non_ascii_kept("%q", "grüße 😀", "\"grüße 😀\"")]
    fn formats_special_verbs(#[case] template: &str, #[case] arg: &str, #[case] expected: &str) {
        assert_that!(format_template(template, &[&arg]), eq(expected));
    }

    #[rstest]
    fn extra_arguments_are_reported() {
        let result = format_template("Hi %s", &[&"Ada", &42]);

        assert_that!(result, eq("Hi Ada%!(EXTRA 42)"));
    }

    #[rstest]
    fn numbers_render_through_display() {
        let result = format_template("%d of %d", &[&3, &10]);

        assert_that!(result, eq("3 of 10"));
    }

    #[rstest]
    fn no_args_returns_template_verbatim() {
        assert_that!(format_template("50% off %s", &[]), eq("50% off %s"));
    }
}
