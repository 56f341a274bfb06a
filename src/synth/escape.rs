// Shell quoting for constructor arguments

use serde_json::Value;

/// Render constructor arguments as a single double-quoted shell token.
///
/// The arguments are written as a compact JSON array, exactly as journaled,
/// and escaped so that the shell hands the JSON back unchanged. An empty
/// argument list renders as an empty string.
///
/// The shell delivers JSON (`["0x01","0x02"]`), not the Python list repr
/// (`['0x01', '0x02']`) that older generated scripts contained.
pub fn constructor_args_token(args: &[Value]) -> String {
    if args.is_empty() {
        return String::new();
    }
    // Serializing a slice of `Value`s cannot fail
    let json = serde_json::to_string(args).unwrap_or_default();
    double_quote(&json)
}

/// Wrap `raw` in double quotes, escaping the characters the shell still
/// interprets inside them.
pub fn double_quote(raw: &str) -> String {
    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('"');
    for c in raw.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
