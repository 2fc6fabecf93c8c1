use crate::config::FormatOptions;

/// Renders a scalar the way the emitter's `$`-placeholders expect it: just
/// its `Display` form.
pub fn format_scalar<T: std::fmt::Display>(value: T) -> String {
    value.to_string()
}

/// Wraps a sequence of values into a delimited, width-limited, indented
/// textual list for embedding into emitted code.
///
/// The running column position starts at 20 to account for a leading
/// assignment prefix (e.g. `G = [`) in the surrounding template; this is an
/// observable contract that tests depend on, not an arbitrary constant.
pub fn format_seq<T: std::fmt::Display>(values: &[T], opts: &FormatOptions, quote: bool) -> String {
    let delim = opts.delimiter.as_str();
    let mut out = String::new();
    let mut pos: usize = 20;
    let last_index = values.len().saturating_sub(1);

    for (i, value) in values.iter().enumerate() {
        let last = i == last_index;
        let rendered = if quote {
            format!("\"{value}\"")
        } else {
            value.to_string()
        };

        if pos + rendered.len() + delim.len() > opts.width {
            out.push('\n');
            out.push_str(&" ".repeat(opts.indent));
            pos = opts.indent;
        }

        out.push_str(&rendered);
        pos += rendered.len();

        if !last {
            out.push_str(delim);
            pos += delim.len();
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(delimiter: &str, width: usize, indent: usize) -> FormatOptions {
        FormatOptions {
            width,
            indent,
            delimiter: delimiter.to_string(),
        }
    }

    #[test]
    fn colon_delimiter_no_wrap() {
        let values: Vec<i32> = (0..7).collect();
        let o = opts(": ", 76, 4);
        assert_eq!(format_seq(&values, &o, false), "0: 1: 2: 3: 4: 5: 6");
    }

    #[test]
    fn quoted_space_delimited() {
        let values: Vec<i32> = (0..5).collect();
        let o = opts(" ", 76, 4);
        assert_eq!(format_seq(&values, &o, true), "\"0\" \"1\" \"2\" \"3\" \"4\"");
    }

    #[test]
    fn scalar_round_trips_as_display() {
        assert_eq!(format_scalar(42), "42");
        assert_eq!(format_scalar("Hello"), "Hello");
    }

    #[test]
    fn narrow_width_forces_wrap() {
        let values: Vec<i32> = (0..20).collect();
        let o = opts(", ", 30, 2);
        let rendered = format_seq(&values, &o, false);
        assert!(rendered.contains('\n'));
        for line in rendered.lines().skip(1) {
            assert!(line.starts_with("  "));
        }
    }
}
