//! Usage and help text rendering.
//!
//! Rendering is pure: the formatter only reads an [`Options`] registry and
//! produces text. The `print_*` methods write that text to any
//! [`std::io::Write`] sink, one block per call, each followed by a newline.

use crate::group::OptionGroup;
use crate::option::Opt;
use crate::options::Options;
use std::cmp::Ordering;
use std::io::Write;
use thiserror::Error;

pub const DEFAULT_WIDTH: usize = 74;
pub const DEFAULT_LEFT_PAD: usize = 1;
pub const DEFAULT_DESC_PAD: usize = 3;
pub const DEFAULT_SYNTAX_PREFIX: &str = "usage: ";
pub const DEFAULT_OPT_PREFIX: &str = "-";
pub const DEFAULT_LONG_OPT_PREFIX: &str = "--";
pub const DEFAULT_LONG_OPT_SEPARATOR: &str = " ";
pub const DEFAULT_ARG_NAME: &str = "arg";

/// Errors that can occur while printing help.
#[derive(Debug, Error)]
pub enum HelpError {
    #[error("usage syntax not provided")]
    EmptySyntax,

    #[error("failed to write help: {0}")]
    Io(#[from] std::io::Error),
}

/// Ordering applied to options in usage lines and option tables.
pub type Comparator = fn(&Opt, &Opt) -> Ordering;

/// Case-insensitive ordering by option key.
///
/// Keys differing only in case keep their registration order, so `-B` added
/// before `-b` stays first. Long names are never consulted: an option with
/// only a long name sorts by that whole name against the other keys.
pub fn compare_by_key(a: &Opt, b: &Opt) -> Ordering {
    a.key().to_lowercase().cmp(&b.key().to_lowercase())
}

/// Renders usage lines and option tables.
#[derive(Debug, Clone)]
pub struct HelpFormatter {
    /// Characters per line
    pub width: usize,
    /// Spaces before each option label
    pub left_pad: usize,
    /// Spaces between the label column and the description
    pub desc_pad: usize,
    pub syntax_prefix: String,
    pub new_line: String,
    pub opt_prefix: String,
    pub long_opt_prefix: String,
    /// Put between a long option and its argument name, e.g. `=`
    pub long_opt_separator: String,
    /// Argument name for options that do not set one
    pub arg_name: String,
    /// `None` keeps registration order
    pub comparator: Option<Comparator>,
}

impl Default for HelpFormatter {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            left_pad: DEFAULT_LEFT_PAD,
            desc_pad: DEFAULT_DESC_PAD,
            syntax_prefix: DEFAULT_SYNTAX_PREFIX.to_string(),
            new_line: "\n".to_string(),
            opt_prefix: DEFAULT_OPT_PREFIX.to_string(),
            long_opt_prefix: DEFAULT_LONG_OPT_PREFIX.to_string(),
            long_opt_separator: DEFAULT_LONG_OPT_SEPARATOR.to_string(),
            arg_name: DEFAULT_ARG_NAME.to_string(),
            comparator: Some(compare_by_key),
        }
    }
}

impl HelpFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full help: usage, header, option table and footer.
    ///
    /// With `auto_usage` the usage line lists every option; otherwise
    /// `syntax` is printed as given. Blank headers and footers are skipped.
    pub fn render_help(
        &self,
        syntax: &str,
        header: Option<&str>,
        options: &Options,
        footer: Option<&str>,
        auto_usage: bool,
    ) -> Result<String, HelpError> {
        if syntax.is_empty() {
            return Err(HelpError::EmptySyntax);
        }

        let mut out = if auto_usage {
            self.render_auto_usage(syntax, options)
        } else {
            self.render_usage(syntax)
        };
        out.push_str(&self.new_line);

        if let Some(header) = header.filter(|h| !h.trim().is_empty()) {
            out.push_str(&self.render_wrapped_text_block(self.width, 0, header));
            out.push_str(&self.new_line);
        }

        out.push_str(&self.render_options(options));
        out.push_str(&self.new_line);

        if let Some(footer) = footer.filter(|f| !f.trim().is_empty()) {
            out.push_str(&self.render_wrapped_text_block(self.width, 0, footer));
            out.push_str(&self.new_line);
        }

        Ok(out)
    }

    pub fn print_help<W: Write>(
        &self,
        out: &mut W,
        syntax: &str,
        header: Option<&str>,
        options: &Options,
        footer: Option<&str>,
        auto_usage: bool,
    ) -> Result<(), HelpError> {
        let text = self.render_help(syntax, header, options, footer, auto_usage)?;
        out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Usage line for a hand-written syntax string.
    ///
    /// Continuation lines line up after the program name.
    pub fn render_usage(&self, syntax: &str) -> String {
        let arg_pos = syntax.chars().position(|c| c == ' ').map_or(0, |p| p + 1);
        let tab_stop = self.syntax_prefix.chars().count() + arg_pos;
        let text = format!("{}{}", self.syntax_prefix, syntax);
        self.render_wrapped_text_block(self.width, tab_stop, &text)
    }

    pub fn print_usage<W: Write>(&self, out: &mut W, syntax: &str) -> Result<(), HelpError> {
        let text = self.render_usage(syntax);
        self.write_line(out, &text)
    }

    /// Usage line generated from the registry, e.g. `usage: app [-a] [-b <arg>]`.
    pub fn render_auto_usage(&self, app: &str, options: &Options) -> String {
        let mut clauses = Vec::new();
        let mut seen: Vec<&OptionGroup> = Vec::new();

        for opt in self.sorted(options.options().collect()) {
            match options.option_group(opt) {
                Some(group) => {
                    if !seen.iter().any(|g| std::ptr::eq(*g, group)) {
                        seen.push(group);
                        clauses.push(self.group_clause(group));
                    }
                }
                None => clauses.push(self.option_clause(opt, opt.is_required())),
            }
        }

        let mut text = format!("{}{}", self.syntax_prefix, app);
        for clause in clauses {
            text.push(' ');
            text.push_str(&clause);
        }

        let tab_stop = text.chars().position(|c| c == ' ').map_or(0, |p| p + 1);
        self.render_wrapped_text_block(self.width, tab_stop, &text)
    }

    pub fn print_auto_usage<W: Write>(
        &self,
        out: &mut W,
        app: &str,
        options: &Options,
    ) -> Result<(), HelpError> {
        let text = self.render_auto_usage(app, options);
        self.write_line(out, &text)
    }

    fn group_clause(&self, group: &OptionGroup) -> String {
        let members: Vec<String> = self
            .sorted(group.options().collect())
            .into_iter()
            .map(|opt| self.option_clause(opt, true))
            .collect();
        let joined = members.join(" | ");
        if group.is_required() {
            joined
        } else {
            format!("[{}]", joined)
        }
    }

    fn option_clause(&self, opt: &Opt, required: bool) -> String {
        let mut clause = String::new();
        if !required {
            clause.push('[');
        }

        match opt.short() {
            Some(short) => {
                clause.push_str(&self.opt_prefix);
                clause.push_str(short);
            }
            None => {
                clause.push_str(&self.long_opt_prefix);
                clause.push_str(opt.long().unwrap_or(""));
            }
        }

        if opt.has_arg() && opt.arg_name() != Some("") {
            clause.push_str(if opt.short().is_none() {
                self.long_opt_separator.as_str()
            } else {
                " "
            });
            clause.push('<');
            clause.push_str(opt.arg_name().unwrap_or(&self.arg_name));
            clause.push('>');
        }

        if !required {
            clause.push(']');
        }
        clause
    }

    /// The option table, one entry per option, without a trailing newline.
    pub fn render_options(&self, options: &Options) -> String {
        let lpad = create_padding(self.left_pad);
        let dpad = create_padding(self.desc_pad);

        let opts = self.sorted(options.options().collect());
        let labels: Vec<String> = opts.iter().map(|opt| self.option_label(opt, &lpad)).collect();
        let max = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let mut out = String::new();
        for (i, (opt, label)) in opts.iter().zip(&labels).enumerate() {
            if i > 0 {
                out.push_str(&self.new_line);
            }

            let mut line = label.clone();
            line.push_str(&create_padding(max - label.chars().count()));
            line.push_str(&dpad);
            if let Some(desc) = opt.description() {
                line.push_str(desc);
            }

            out.push_str(&self.render_wrapped_text(self.width, max + self.desc_pad, &line));
        }
        out
    }

    pub fn print_options<W: Write>(&self, out: &mut W, options: &Options) -> Result<(), HelpError> {
        let text = self.render_options(options);
        self.write_line(out, &text)
    }

    fn option_label(&self, opt: &Opt, lpad: &str) -> String {
        let mut label = String::from(lpad);
        match opt.short() {
            None => {
                label.push_str("   ");
                label.push_str(&self.long_opt_prefix);
                label.push_str(opt.long().unwrap_or(""));
            }
            Some(short) => {
                label.push_str(&self.opt_prefix);
                label.push_str(short);
                if let Some(long) = opt.long() {
                    label.push(',');
                    label.push_str(&self.long_opt_prefix);
                    label.push_str(long);
                }
            }
        }

        if opt.has_arg() {
            match opt.arg_name() {
                Some("") => label.push(' '),
                name => {
                    label.push_str(if opt.has_long() {
                        self.long_opt_separator.as_str()
                    } else {
                        " "
                    });
                    label.push('<');
                    label.push_str(name.unwrap_or(&self.arg_name));
                    label.push('>');
                }
            }
        }
        label
    }

    /// Print `text` wrapped to the width, each line starting at column 0.
    pub fn print_wrapped<W: Write>(
        &self,
        out: &mut W,
        next_line_tab_stop: usize,
        text: &str,
    ) -> Result<(), HelpError> {
        let text = self.render_wrapped_text_block(self.width, next_line_tab_stop, text);
        self.write_line(out, &text)
    }

    /// Wrap a single paragraph.
    ///
    /// Lines after the first are indented by `next_line_tab_stop` spaces. The
    /// indent is clamped below `width` and words longer than a line are cut.
    pub fn render_wrapped_text(&self, width: usize, next_line_tab_stop: usize, text: &str) -> String {
        let width = width.max(1);
        let mut out = String::new();
        let mut chars: Vec<char> = text.chars().collect();

        let Some(mut pos) = wrap_pos(&chars, width, 0) else {
            out.push_str(rtrim(text));
            return out;
        };
        out.push_str(rtrim(&collect(&chars[..pos])));
        out.push_str(&self.new_line);

        let tab_stop = if next_line_tab_stop < width {
            next_line_tab_stop
        } else if width > 1 {
            1
        } else {
            0
        };
        let padding = create_padding(tab_stop);

        loop {
            let rest = collect(&chars[pos..]);
            let line = format!("{}{}", padding, rest.trim());
            chars = line.chars().collect();

            match wrap_pos(&chars, width, 0) {
                None => {
                    out.push_str(&line);
                    return out;
                }
                Some(p) => {
                    // a break inside the indent would make no progress
                    pos = if chars.len() > width && tab_stop > 0 && p == tab_stop - 1 {
                        width
                    } else {
                        p
                    };
                    out.push_str(rtrim(&collect(&chars[..pos])));
                    out.push_str(&self.new_line);
                }
            }
        }
    }

    /// Wrap text that may contain several lines, each wrapped on its own.
    pub fn render_wrapped_text_block(
        &self,
        width: usize,
        next_line_tab_stop: usize,
        text: &str,
    ) -> String {
        let mut out = String::new();
        for (i, line) in split_lines(text).enumerate() {
            if i > 0 {
                out.push_str(&self.new_line);
            }
            out.push_str(&self.render_wrapped_text(width, next_line_tab_stop, line));
        }
        out
    }

    fn sorted<'o>(&self, mut opts: Vec<&'o Opt>) -> Vec<&'o Opt> {
        if let Some(cmp) = self.comparator {
            opts.sort_by(|a, b| cmp(a, b));
        }
        opts
    }

    fn write_line<W: Write>(&self, out: &mut W, text: &str) -> Result<(), HelpError> {
        out.write_all(text.as_bytes())?;
        out.write_all(self.new_line.as_bytes())?;
        Ok(())
    }
}

/// Position to break `text` so the line fits in `width` columns from `start`.
///
/// Positions count characters. A newline or tab within reach wins; otherwise
/// the last space at or before `start + width`, or a hard cut there when the
/// word is too long. `None` means the rest already fits. A zero width is
/// treated as 1, so a returned position is always past `start`.
pub fn find_wrap_pos(text: &str, width: usize, start: usize) -> Option<usize> {
    let chars: Vec<char> = text.chars().collect();
    wrap_pos(&chars, width, start)
}

fn wrap_pos(text: &[char], width: usize, start: usize) -> Option<usize> {
    let limit = start + width.max(1);

    for marker in ['\n', '\t'] {
        let found = text
            .iter()
            .skip(start)
            .position(|&c| c == marker)
            .map(|p| p + start);
        if let Some(pos) = found.filter(|&p| p <= limit) {
            return Some(pos + 1);
        }
    }

    if limit >= text.len() {
        return None;
    }

    let space = (start..=limit)
        .rev()
        .find(|&p| matches!(text[p], ' ' | '\n' | '\r'));
    match space {
        Some(pos) if pos > start => Some(pos),
        _ => Some(limit),
    }
}

/// `len` spaces.
pub fn create_padding(len: usize) -> String {
    " ".repeat(len)
}

/// `s` without trailing whitespace.
pub fn rtrim(s: &str) -> &str {
    s.trim_end()
}

/// Lines split on `\r\n`, `\n` or `\r`, without a trailing empty line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let text = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix(|c: char| c == '\n' || c == '\r'))
        .unwrap_or(text);
    text.split("\r\n").flat_map(|part| part.split(['\n', '\r']))
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_wrap_pos() {
        let text = "This is a test.";
        assert_eq!(find_wrap_pos(text, 8, 0), Some(7));
        assert_eq!(find_wrap_pos(text, 8, 8), None);

        // words longer than the width are cut
        assert_eq!(find_wrap_pos("aaaa aa", 3, 0), Some(3));

        // last word as long as the width
        let text = "aaaaaa aaaaaa";
        assert_eq!(find_wrap_pos(text, 6, 0), Some(6));
        assert_eq!(find_wrap_pos(text, 6, 7), None);

        assert_eq!(find_wrap_pos("aaaaaa\n aaaaaa", 6, 0), Some(7));
        assert_eq!(find_wrap_pos("aaaaaa\t aaaaaa", 6, 0), Some(7));
    }

    #[test]
    fn test_find_wrap_pos_zero_width_advances() {
        let text = "abc def";
        assert_eq!(find_wrap_pos(text, 0, 0), Some(1));
        assert_eq!(find_wrap_pos(text, 0, 2), Some(3));
        assert_eq!(find_wrap_pos(text, 0, 6), None);

        let mut pos = 0;
        let mut breaks = Vec::new();
        while let Some(next) = find_wrap_pos(text, 0, pos) {
            assert!(next > pos);
            breaks.push(next);
            pos = next;
        }
        assert_eq!(breaks, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_render_wrapped_text_word_cut() {
        let hf = HelpFormatter::new();
        assert_eq!(hf.render_wrapped_text(7, 0, "Thisisatest."), "Thisisa\ntest.");
    }

    #[test]
    fn test_render_wrapped_text_single_line() {
        let hf = HelpFormatter::new();
        assert_eq!(hf.render_wrapped_text(12, 0, "This is a test."), "This is a\ntest.");
        assert_eq!(
            hf.render_wrapped_text(12, 4, "This is a test."),
            "This is a\n    test."
        );
    }

    #[test]
    fn test_render_wrapped_text_padded_long_line() {
        let hf = HelpFormatter::new();
        let text = "  -p,--period <PERIOD>  PERIOD is time duration of form \
                    DATE[-DATE] where DATE has form YYYY[MM[DD]]";
        let indent = create_padding(24);
        let expected = format!(
            "  -p,--period <PERIOD>  PERIOD is time duration of\n\
             {indent}form DATE[-DATE] where DATE\n\
             {indent}has form YYYY[MM[DD]]"
        );
        assert_eq!(hf.render_wrapped_text(53, 24, text), expected);
    }

    #[test]
    fn test_render_wrapped_text_multi_line() {
        let hf = HelpFormatter::new();
        let text = "aaaa aaaa aaaa\naaaaaa\naaaaa";
        assert_eq!(hf.render_wrapped_text(16, 0, text), text);
        assert_eq!(
            hf.render_wrapped_text(16, 4, text),
            "aaaa aaaa aaaa\n    aaaaaa\n    aaaaa"
        );
    }

    #[test]
    fn test_render_wrapped_text_long_word_with_indent() {
        let hf = HelpFormatter::new();
        let text = " -h,--help   This is a looooong description";
        let expected = [
            " -h,--help   This is",
            "             a",
            "             looooon",
            "             g",
            "             descrip",
            "             tion",
        ]
        .join("\n");
        assert_eq!(hf.render_wrapped_text(20, 13, text), expected);
    }

    #[test]
    fn test_render_wrapped_text_terminates_for_tiny_widths() {
        let hf = HelpFormatter::new();
        let text = "a looooooong word and\tsome\nbreaks";
        for width in 0..12 {
            for tab_stop in 0..15 {
                let out = hf.render_wrapped_text(width, tab_stop, text);
                assert!(!out.is_empty());
            }
        }
    }

    #[test]
    fn test_render_wrapped_text_indent_wider_than_width() {
        let hf = HelpFormatter::new();
        // the indent is clamped to one column
        assert_eq!(hf.render_wrapped_text(5, 10, "aaa bbb ccc"), "aaa\n bbb\n ccc");
    }

    #[test]
    fn test_render_options() {
        let hf = HelpFormatter::new();
        let mut options = Options::new();
        options.add("a", false, "aaaa aaaa aaaa aaaa aaaa").unwrap();

        let mut narrow = hf.clone();
        narrow.width = 60;
        assert_eq!(narrow.render_options(&options), " -a   aaaa aaaa aaaa aaaa aaaa");

        narrow.width = 6 + 17;
        assert_eq!(
            narrow.render_options(&options),
            " -a   aaaa aaaa aaaa\n      aaaa aaaa"
        );
    }

    #[test]
    fn test_render_options_aligns_labels() {
        let mut hf = HelpFormatter::new();
        hf.width = 25;
        let mut options = Options::new();
        options
            .add_long(Some("a"), "aaa", false, "dddd dddd dddd dddd")
            .unwrap()
            .add("b", false, "feeee eeee eeee eeee")
            .unwrap();

        let expected = [
            " -a,--aaa   dddd dddd",
            "            dddd dddd",
            " -b         feeee eeee",
            "            eeee eeee",
        ]
        .join("\n");
        assert_eq!(hf.render_options(&options), expected);
    }

    #[test]
    fn test_render_options_without_short_name() {
        let mut hf = HelpFormatter::new();
        hf.left_pad = 2;
        hf.desc_pad = 2;
        let mut options = Options::new();
        options
            .add_long(Some("a"), "aaa", false, "aaaaaaa")
            .unwrap()
            .add_long(None, "bbb", false, "bbbbbbb")
            .unwrap()
            .add("c", false, "ccccccc")
            .unwrap();

        let expected = ["  -a,--aaa  aaaaaaa", "     --bbb  bbbbbbb", "  -c        ccccccc"].join("\n");
        assert_eq!(hf.render_options(&options), expected);
    }

    #[test]
    fn test_auto_usage() {
        let hf = HelpFormatter::new();
        let mut options = Options::new();
        options.add("a", false, "aaaa aaaa aaaa aaaa aaaa").unwrap();
        assert_eq!(hf.render_auto_usage("app", &options), "usage: app [-a]");

        options.add("b", false, "bbb").unwrap();
        assert_eq!(hf.render_auto_usage("app", &options), "usage: app [-a] [-b]");
    }

    #[test]
    fn test_auto_usage_sorting() {
        let mut options = Options::new();
        options
            .add("c", false, "first")
            .unwrap()
            .add("b", false, "second")
            .unwrap()
            .add("a", false, "third")
            .unwrap();

        let mut hf = HelpFormatter::new();
        assert_eq!(hf.render_auto_usage("app", &options), "usage: app [-a] [-b] [-c]");

        hf.comparator = None;
        assert_eq!(hf.render_auto_usage("app", &options), "usage: app [-c] [-b] [-a]");

        fn reverse(a: &Opt, b: &Opt) -> Ordering {
            b.key().cmp(a.key())
        }
        hf.comparator = Some(reverse);
        assert_eq!(hf.render_auto_usage("app", &options), "usage: app [-c] [-b] [-a]");
    }

    #[test]
    fn test_auto_usage_case_only_keys_keep_order() {
        let hf = HelpFormatter::new();

        let mut options = Options::new();
        options.add("B", false, "").unwrap().add("b", false, "").unwrap();
        assert_eq!(hf.render_auto_usage("app", &options), "usage: app [-B] [-b]");

        let mut options = Options::new();
        options.add("b", false, "").unwrap().add("B", false, "").unwrap();
        assert_eq!(hf.render_auto_usage("app", &options), "usage: app [-b] [-B]");

        let mut options = Options::new();
        options
            .add_long(None, "apple", false, "")
            .unwrap()
            .add("b", false, "")
            .unwrap()
            .add("A", false, "")
            .unwrap();
        assert_eq!(
            hf.render_auto_usage("app", &options),
            "usage: app [-A] [--apple] [-b]"
        );
    }

    #[test]
    fn test_auto_usage_groups() {
        let mut group = OptionGroup::new();
        for key in ["a", "b", "c"] {
            group.add_option(Opt::builder().short(key).build().unwrap());
        }
        let mut options = Options::new();
        options.add_option_group(group.clone());

        let hf = HelpFormatter::new();
        assert_eq!(hf.render_auto_usage("app", &options), "usage: app [-a | -b | -c]");

        group.set_required(true);
        let mut options = Options::new();
        options.add_option_group(group);
        assert_eq!(hf.render_auto_usage("app", &options), "usage: app -a | -b | -c");
    }

    #[test]
    fn test_auto_usage_group_followed_by_option() {
        let mut group = OptionGroup::new();
        group
            .add_option(Opt::builder().short("a").build().unwrap())
            .add_option(Opt::builder().short("b").build().unwrap());
        let mut options = Options::new();
        options.add_option_group(group);
        options.add("c", false, "").unwrap();

        let hf = HelpFormatter::new();
        assert_eq!(hf.render_auto_usage("app", &options), "usage: app [-a | -b] [-c]");
    }

    #[test]
    fn test_auto_usage_arg_names() {
        let mut options = Options::new();
        let mut opt = Opt::builder().short("f").has_arg().required().build().unwrap();
        opt.set_arg_name("");
        options.add_option(opt);

        let mut hf = HelpFormatter::new();
        assert_eq!(hf.render_auto_usage("app", &options), "usage: app -f");

        let mut options = Options::new();
        options.add_option(Opt::builder().short("f").has_arg().required().build().unwrap());
        hf.arg_name = "argument".to_string();
        assert_eq!(hf.render_auto_usage("app", &options), "usage: app -f <argument>");
    }

    #[test]
    fn test_usage_with_long_opt_separator() {
        let mut options = Options::new();
        options.add("f", true, "the file").unwrap();
        options.add_option(
            Opt::builder()
                .short("s")
                .long("size")
                .desc("the size")
                .has_arg()
                .arg_name("SIZE")
                .build()
                .unwrap(),
        );
        options.add_option(
            Opt::builder()
                .long("age")
                .desc("the age")
                .has_arg()
                .build()
                .unwrap(),
        );

        let mut hf = HelpFormatter::new();
        hf.long_opt_separator = "=".to_string();
        hf.width = 80;
        assert_eq!(
            hf.render_auto_usage("create", &options),
            "usage: create [--age=<arg>] [-f <arg>] [-s <SIZE>]"
        );
    }

    #[test]
    fn test_plain_usage_wraps_after_program_name() {
        let mut hf = HelpFormatter::new();
        hf.width = 20;
        assert_eq!(
            hf.render_usage("app [-a] [-b] [-c] [-d] [-e]"),
            "usage: app [-a] [-b]\n           [-c] [-d]\n           [-e]"
        );
    }

    #[test]
    fn test_print_usage_writes_newline() {
        let hf = HelpFormatter::new();
        let mut out = Vec::new();
        hf.print_usage(&mut out, "app").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "usage: app\n");
    }

    #[test]
    fn test_empty_syntax() {
        let hf = HelpFormatter::new();
        let result = hf.render_help("", None, &Options::new(), None, false);
        assert!(matches!(result, Err(HelpError::EmptySyntax)));
    }

    #[test]
    fn test_rtrim_and_padding() {
        assert_eq!(rtrim(""), "");
        assert_eq!(rtrim("  foo  "), "  foo");
        assert_eq!(create_padding(3), "   ");
        assert_eq!(create_padding(0), "");
    }
}
